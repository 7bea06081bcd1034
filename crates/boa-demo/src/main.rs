//! `boa-demo`: a toy build tool showing commands, options, profiles and
//! layered configuration.
//!
//! ```text
//! boa-demo build --help
//! boa-demo build release
//! BOA_DEMO_JOBS=8 boa-demo build dbg --verbose
//! ```
//!
//! Set `RUST_LOG=debug` to follow config discovery and command dispatch.

use anyhow::bail;
use boa::{ArgOption, ArgsRule, Command, CommandBuilder, Config, ConfigBuilder, Invocation, Profile};
use serde::Deserialize;
use std::rc::Rc;

const APP: &str = "boa-demo";

#[derive(Debug, Deserialize)]
struct Settings {
    jobs: i64,
    target_dir: String,
}

fn main() {
    env_logger::init();

    let cfg = Rc::new(
        ConfigBuilder::new_default(APP)
            .with_env_prefix("boa_demo")
            .with_default_env_key_replacer()
            .with_automatic_env()
            .with_default("jobs", 4)
            .with_default("target_dir", "target")
            .build(),
    );
    if let Some(file) = cfg.config_file_used() {
        log::info!("using config file {}", file.display());
    }

    let code = match app(cfg).execute() {
        Ok(()) => 0,
        Err(e) => {
            log::debug!("{APP} failed: {e:?}");
            1
        }
    };
    std::process::exit(code);
}

fn app(cfg: Rc<Config>) -> Command {
    CommandBuilder::new(APP)
        .with_short_description("A toy build tool")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_options_template()
        .with_bool_p_persistent_flag("verbose", 'v', false, "print each step")
        .with_sub_commands([build(Rc::clone(&cfg)), config(cfg)])
        .build()
}

fn build(cfg: Rc<Config>) -> Command {
    CommandBuilder::new("build")
        .with_short_description("Build the project")
        .with_example("  boa-demo build release\n  boa-demo build dbg --jobs 2")
        .with_options([
            ArgOption::new(["debug", "dbg"], "unoptimized build with debug info"),
            ArgOption::new(["release"], "optimized build"),
            ArgOption::new(["docs"], "API documentation"),
        ])
        .with_profiles([
            Profile::new(["all"], ["debug", "release", "docs"], "everything"),
            Profile::new(["ci"], ["release", "docs"], "what CI runs"),
        ])
        .with_valid_args_from_options()
        .with_arg_aliases(["all", "ci"])
        .with_args(ArgsRule::MatchAll(vec![
            ArgsRule::MinimumNArgs(1),
            ArgsRule::OnlyValidArgs,
        ]))
        .with_int_p_flag("jobs", 'j', 0, "parallel jobs (0 uses the configured value)")
        .with_run_e(move |inv| run_build(inv, &cfg))
        .build()
}

fn config(cfg: Rc<Config>) -> Command {
    CommandBuilder::new("config")
        .with_short_description("Print the effective configuration")
        .with_args(ArgsRule::NoArgs)
        .with_run_e(move |_| {
            let settings: Settings = cfg.unmarshal()?;
            println!("jobs = {}", settings.jobs);
            println!("target_dir = {:?}", settings.target_dir);
            Ok(())
        })
        .build()
}

fn run_build(inv: &Invocation<'_>, cfg: &Config) -> anyhow::Result<()> {
    let jobs = match inv.get_one::<i64>("jobs") {
        Some(j) if j > 0 => j,
        _ => cfg.get_i64("jobs"),
    };
    if jobs < 1 {
        bail!("jobs must be positive, got {jobs}");
    }

    let cmd = inv.command();
    let mut steps: Vec<&str> = Vec::new();
    for arg in inv.args() {
        match cmd.profiles().iter().find(|p| p.args.contains(arg)) {
            Some(profile) => steps.extend(profile.opts.iter().map(String::as_str)),
            None => steps.push(arg),
        }
    }

    for step in steps {
        let name = cmd
            .options()
            .iter()
            .find(|o| o.matches(step))
            .and_then(ArgOption::name)
            .unwrap_or(step);
        if inv.get_bool("verbose") {
            println!("building {name} with {jobs} job(s) into {}", cfg.get_string("target_dir"));
        } else {
            println!("building {name}");
        }
    }
    Ok(())
}
