use boa::{ArgOption, Command, CommandBuilder, Lineage, Profile};

fn opts() -> Vec<ArgOption> {
    vec![
        ArgOption::new(["option1", "opt1"], "opt1 description"),
        ArgOption::new(["option2"], "opt2 description"),
    ]
}

fn profiles() -> Vec<Profile> {
    vec![
        Profile::new(["profile1", "prof1"], ["opt1", "option2"], "prof1 description"),
        Profile::new(["profile2"], ["option1"], "prof2 description"),
    ]
}

fn help_output(cmd: &Command) -> String {
    let mut out = Vec::new();
    let mut err = Vec::new();
    cmd.execute_with(["-h"], &mut out, &mut err).unwrap();
    assert!(err.is_empty(), "stderr: {}", String::from_utf8_lossy(&err));
    String::from_utf8(out).unwrap()
}

#[test]
fn test_options_help() {
    let cmd = CommandBuilder::new("options")
        .with_options_and_template(opts())
        .with_no_op()
        .build();

    assert_eq!(
        help_output(&cmd),
        "\
Usage:
  options [flags] [options]

Options:
  option1, opt1   opt1 description
  option2         opt2 description

Flags:
  -h, --help   help for options
"
    );
}

#[test]
fn test_profiles_help() {
    let cmd = CommandBuilder::new("profiles")
        .with_options_and_template(opts())
        .with_profiles(profiles())
        .with_no_op()
        .build();

    assert_eq!(
        help_output(&cmd),
        "\
Usage:
  profiles [flags] [options]

Options:
  option1, opt1   opt1 description
  option2         opt2 description

Profiles:
  profile1, prof1   prof1 description
    ↳ Options:      opt1, option2
  profile2          prof2 description
    ↳ Options:      option1

Flags:
  -h, --help   help for profiles
"
    );
}

#[test]
fn test_options_template_without_options() {
    let cmd = CommandBuilder::new("plain")
        .with_options_template()
        .with_no_op()
        .build();

    let output = help_output(&cmd);
    assert!(!output.contains("Options:"), "output:\n{output}");
    assert!(!output.contains("[options]"), "output:\n{output}");
    assert!(output.starts_with("Usage:\n  plain [flags]\n"), "output:\n{output}");
}

#[test]
fn test_rendering_is_idempotent() {
    let cmd = CommandBuilder::new("profiles")
        .with_options_and_template(opts())
        .with_profiles(profiles())
        .with_no_op()
        .build();

    assert_eq!(help_output(&cmd), help_output(&cmd));
}

#[test]
fn test_usage_on_error_lists_options() {
    let cmd = CommandBuilder::new("options")
        .with_options_and_template(opts())
        .with_no_op()
        .build();

    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = cmd.execute_with(["--bogus"], &mut out, &mut err);

    assert_eq!(result.unwrap_err().to_string(), "unknown flag: --bogus");
    let err = String::from_utf8(err).unwrap();
    assert!(err.starts_with("Error: unknown flag: --bogus\nUsage:\n"), "stderr:\n{err}");
    // Usage alignment uses wider tab stops than help.
    assert!(err.contains("  option1, opt1        opt1 description\n"), "stderr:\n{err}");
    assert!(out.is_empty());
}

#[test]
fn test_subcommand_inherits_options_template() {
    let root = CommandBuilder::new("app")
        .with_options_template()
        .with_sub_commands([CommandBuilder::new("get")
            .with_short_description("Get things")
            .with_options(opts())
            .with_no_op()
            .build()])
        .build();

    let mut out = Vec::new();
    root.execute_with(["get", "--help"], &mut out, &mut std::io::sink())
        .unwrap();
    let output = String::from_utf8(out).unwrap();

    assert!(output.contains("  app get [flags] [options]\n"), "output:\n{output}");
    assert!(output.contains("  option2         opt2 description\n"), "output:\n{output}");
}

#[test]
fn test_render_help_directly() {
    let cmd = CommandBuilder::new("options")
        .with_options_and_template(opts())
        .with_no_op()
        .build();

    let mut direct = Vec::new();
    boa::render_help(&Lineage::new(&cmd), &mut direct, &mut std::io::sink());
    assert_eq!(String::from_utf8(direct).unwrap(), help_output(&cmd));
}
