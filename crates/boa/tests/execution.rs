use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use boa::{ArgsRule, Command, CommandBuilder};

type Trace = Rc<RefCell<Vec<String>>>;

fn run(cmd: &Command, args: &[&str]) -> (boa::Result<()>, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = cmd.execute_with(args.iter().copied(), &mut out, &mut err);
    (
        result,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn record(trace: &Trace, event: &str) -> impl Fn(&boa::Invocation<'_>) + 'static {
    let trace = Rc::clone(trace);
    let event = event.to_string();
    move |_| trace.borrow_mut().push(event.clone())
}

fn tree(trace: &Trace) -> Command {
    CommandBuilder::new("app")
        .with_persistent_pre_run(record(trace, "root persistent pre"))
        .with_persistent_post_run(record(trace, "root persistent post"))
        .with_sub_commands([
            CommandBuilder::new("list")
                .with_short_description("List things")
                .with_pre_run(record(trace, "pre"))
                .with_run(record(trace, "run"))
                .with_post_run(record(trace, "post"))
                .build(),
            CommandBuilder::new("serve")
                .with_short_description("Serve things")
                .with_persistent_pre_run(record(trace, "serve persistent pre"))
                .with_run(record(trace, "serve"))
                .build(),
        ])
        .build()
}

#[test]
fn test_hook_order() {
    let trace: Trace = Rc::default();
    let cmd = tree(&trace);

    let (result, out, err) = run(&cmd, &["list"]);
    result.unwrap();
    assert!(out.is_empty() && err.is_empty());
    assert_eq!(
        *trace.borrow(),
        vec!["root persistent pre", "pre", "run", "post", "root persistent post"]
    );
}

#[test]
fn test_nearest_persistent_hook_wins() {
    let trace: Trace = Rc::default();
    let cmd = tree(&trace);

    run(&cmd, &["serve"]).0.unwrap();
    assert_eq!(
        *trace.borrow(),
        vec!["serve persistent pre", "serve", "root persistent post"]
    );
}

#[test]
fn test_failing_hook_stops_the_chain() {
    let trace: Trace = Rc::default();
    let cmd = CommandBuilder::new("app")
        .with_pre_run_e(|_| Err(anyhow::anyhow!("not ready")))
        .with_pre_run(record(&trace, "plain pre"))
        .with_run(record(&trace, "run"))
        .silence_usage()
        .build();

    let (result, _, err) = run(&cmd, &[]);
    assert_eq!(result.unwrap_err().to_string(), "not ready");
    assert_eq!(err, "Error: not ready\n");
    assert!(trace.borrow().is_empty());
}

#[test]
fn test_positional_args_reach_hooks() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let cmd = CommandBuilder::new("cat")
        .with_bool_p_flag("number", 'n', false, "number lines")
        .with_run(move |inv| {
            assert!(inv.get_bool("number"));
            sink.borrow_mut().extend(inv.args().iter().cloned());
        })
        .build();

    run(&cmd, &["a.txt", "-n", "b.txt"]).0.unwrap();
    assert_eq!(*seen.borrow(), vec!["a.txt", "b.txt"]);
}

#[test]
fn test_persistent_flag_reaches_subcommand() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let cmd = CommandBuilder::new("app")
        .with_string_p_persistent_flag("config", 'c', "app.toml", "config file")
        .with_sub_commands([CommandBuilder::new("show")
            .with_run(move |inv| sink.borrow_mut().push(inv.get_string("config")))
            .build()])
        .build();

    run(&cmd, &["show"]).0.unwrap();
    run(&cmd, &["show", "-c", "other.toml"]).0.unwrap();
    run(&cmd, &["--config=third.toml", "show"]).0.unwrap();
    assert_eq!(*seen.borrow(), vec!["app.toml", "other.toml", "third.toml"]);
}

#[test]
fn test_unknown_command_suggests() {
    let trace: Trace = Rc::default();
    let cmd = tree(&trace);

    let (result, out, err) = run(&cmd, &["lsit"]);
    let message = result.unwrap_err().to_string();
    assert_eq!(
        message,
        "unknown command \"lsit\" for \"app\"\n\nDid you mean this?\n\tlist\n"
    );
    assert_eq!(err, format!("Error: {message}\nRun 'app --help' for usage.\n"));
    assert!(out.is_empty());
}

#[test]
fn test_root_without_run_shows_help() {
    let trace: Trace = Rc::default();
    let cmd = tree(&trace);

    let (result, out, _) = run(&cmd, &[]);
    result.unwrap();
    assert!(out.starts_with("Usage:\n  app [command]\n"), "output:\n{out}");
    assert!(out.contains("\nAvailable Commands:\n  help        Help about any command\n  list        List things\n  serve       Serve things\n"), "output:\n{out}");
    assert!(out.ends_with("Use \"app [command] --help\" for more information about a command.\n"), "output:\n{out}");
    assert!(trace.borrow().is_empty());
}

#[test]
fn test_help_command() {
    let trace: Trace = Rc::default();
    let cmd = tree(&trace);

    let (result, out, _) = run(&cmd, &["help", "list"]);
    result.unwrap();
    assert!(out.starts_with("List things\n\nUsage:\n  app list [flags]\n"), "output:\n{out}");

    let (result, out, _) = run(&cmd, &["help", "nope", "more"]);
    result.unwrap();
    assert!(out.starts_with("Unknown help topic [`nope` `more`]\nUsage:\n"), "output:\n{out}");
    assert!(trace.borrow().is_empty());
}

#[test]
fn test_custom_help_func() {
    let cmd = CommandBuilder::new("app")
        .with_help_func(|lineage, _args, out, _err| {
            let _ = writeln!(out, "custom help for {}", lineage.command_path());
        })
        .with_sub_commands([CommandBuilder::new("sub").with_no_op().build()])
        .build();

    let (_, out, _) = run(&cmd, &["sub", "--help"]);
    assert_eq!(out, "custom help for app sub\n");
}

#[test]
fn test_version_flag() {
    let cmd = CommandBuilder::new("app")
        .with_version("1.2.3")
        .with_no_op()
        .build();

    assert_eq!(run(&cmd, &["--version"]).1, "app version 1.2.3\n");
    assert_eq!(run(&cmd, &["-v"]).1, "app version 1.2.3\n");

    let custom = cmd
        .to_builder()
        .with_version_template("{{ version }}\n")
        .build();
    assert_eq!(run(&custom, &["--version"]).1, "1.2.3\n");
}

#[test]
fn test_deprecations() {
    let cmd = CommandBuilder::new("app")
        .with_sub_commands([CommandBuilder::new("old")
            .deprecated("use new instead")
            .with_string_flag("legacy-name", "", "old name")
            .with_bool_p_flag("quiet", 'q', false, "less output")
            .mark_flag_deprecated("legacy-name", "use --name")
            .mark_flag_shorthand_deprecated("quiet", "use --quiet")
            .with_no_op()
            .build()])
        .build();

    let (result, out, err) = run(&cmd, &["old", "--legacy-name", "x", "-q"]);
    result.unwrap();
    assert_eq!(out, "Command \"old\" is deprecated, use new instead\n");
    assert_eq!(
        err,
        "Flag --legacy-name has been deprecated, use --name\nFlag shorthand -q has been deprecated, use --quiet\n"
    );

    let (_, _, err) = run(&cmd, &["old", "--quiet"]);
    assert!(err.is_empty(), "stderr:\n{err}");
}

#[test]
fn test_args_rules() {
    let cmd = CommandBuilder::new("get")
        .with_args(ArgsRule::ExactArgs(1))
        .with_no_op()
        .silence_usage()
        .build();
    assert_eq!(
        run(&cmd, &["a", "b"]).0.unwrap_err().to_string(),
        "accepts 1 arg(s), received 2"
    );
    run(&cmd, &["a"]).0.unwrap();

    let cmd = CommandBuilder::new("get")
        .with_valid_args(["pods", "nodes\tcluster nodes"])
        .with_args(ArgsRule::MatchAll(vec![
            ArgsRule::OnlyValidArgs,
            ArgsRule::MaximumNArgs(1),
        ]))
        .with_no_op()
        .silence_usage()
        .build();
    run(&cmd, &["nodes"]).0.unwrap();
    assert_eq!(
        run(&cmd, &["pdos"]).0.unwrap_err().to_string(),
        "invalid argument \"pdos\" for \"get\""
    );
    assert_eq!(
        run(&cmd, &["pods", "nodes"]).0.unwrap_err().to_string(),
        "accepts at most 1 arg(s), received 2"
    );
}

#[test]
fn test_custom_args_rule() {
    let cmd = CommandBuilder::new("put")
        .with_args(ArgsRule::custom(|cmd, args| {
            if args.iter().all(|a| a.contains('=')) {
                Ok(())
            } else {
                anyhow::bail!("{} expects key=value pairs", cmd.name())
            }
        }))
        .with_no_op()
        .silence_usage()
        .build();

    run(&cmd, &["a=1", "b=2"]).0.unwrap();
    assert_eq!(
        run(&cmd, &["a"]).0.unwrap_err().to_string(),
        "put expects key=value pairs"
    );
}

#[test]
fn test_required_flags() {
    let cmd = CommandBuilder::new("app")
        .with_string_persistent_flag("token", "", "API token")
        .mark_persistent_flag_required("token")
        .with_sub_commands([CommandBuilder::new("call").with_no_op().build()])
        .silence_usage()
        .build();

    let (result, _, err) = run(&cmd, &["call"]);
    assert_eq!(
        result.unwrap_err().to_string(),
        "required flag(s) \"token\" not set"
    );
    assert_eq!(err, "Error: required flag(s) \"token\" not set\n");
    run(&cmd, &["call", "--token", "t"]).0.unwrap();
}

#[test]
fn test_flag_groups() {
    let cmd = CommandBuilder::new("export")
        .with_bool_flag("json", false, "")
        .with_bool_flag("yaml", false, "")
        .with_string_flag("user", "", "")
        .with_string_flag("pass", "", "")
        .mark_flags_mutually_exclusive(&["json", "yaml"])
        .mark_flags_one_required(&["json", "yaml"])
        .mark_flags_required_together(&["user", "pass"])
        .with_no_op()
        .silence_errors()
        .silence_usage()
        .build();

    let error = |args: &[&str]| run(&cmd, args).0.unwrap_err().to_string();

    assert_eq!(
        error(&["--json", "--yaml"]),
        "if any flags in the group [json yaml] are set none of the others can be; [json yaml] were all set"
    );
    assert_eq!(
        error(&[]),
        "at least one of the flags in the group [json yaml] is required"
    );
    assert_eq!(
        error(&["--json", "--user", "me"]),
        "if any flags in the group [user pass] are set they must all be set; missing [pass]"
    );
    run(&cmd, &["--yaml", "--user", "me", "--pass", "secret"]).0.unwrap();
}

#[test]
fn test_flag_errors() {
    let cmd = CommandBuilder::new("app")
        .with_int_flag("port", 80, "")
        .with_no_op()
        .silence_usage()
        .build();

    assert_eq!(
        run(&cmd, &["--nope"]).0.unwrap_err().to_string(),
        "unknown flag: --nope"
    );
    assert_eq!(
        run(&cmd, &["-z"]).0.unwrap_err().to_string(),
        "unknown shorthand flag: 'z' in -z"
    );
    let message = run(&cmd, &["--port", "http"]).0.unwrap_err().to_string();
    assert!(
        message.starts_with("invalid argument \"http\" for \"--port\" flag: "),
        "{message}"
    );
}

#[test]
fn test_silenced_errors_keep_usage() {
    let cmd = CommandBuilder::new("app")
        .with_run_e(|_| anyhow::bail!("failed"))
        .silence_errors()
        .build();

    let (result, _, err) = run(&cmd, &[]);
    assert_eq!(result.unwrap_err().to_string(), "failed");
    assert_eq!(err, "Usage:\n  app [flags]\n\nFlags:\n  -h, --help   help for app\n\n");
}

#[test]
fn test_disable_flag_parsing() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let cmd = CommandBuilder::new("wrap")
        .disable_flag_parsing()
        .with_run(move |inv| sink.borrow_mut().extend(inv.args().iter().cloned()))
        .build();

    run(&cmd, &["git", "--no-pager", "-h"]).0.unwrap();
    assert_eq!(*seen.borrow(), vec!["git", "--no-pager", "-h"]);
}
