//! 命令参数解析集成测试

use blockstack_cli::argparse::{
    all_commands_list, command_usage, full_reference, parse_options, reconcile, validate,
    validate_command, OptionValue, GLOBAL_OPTION_SPEC,
};
use blockstack_cli::error::ArgParseError;
use blockstack_cli::schema::builtin;
use blockstack_cli::{parse_command_args, ParseOutcome};

const ADDRESS: &str = "1FhZqKVRxRaHKfUPr7aqNrCJSFUz4GrpX4";
const OWNER_KEY: &str = "4c3ab2a0704dfd9fdc319cff2c3629b72ebda1580316c7fddf9fad1baa323e9601";

fn placeholder_values(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("value{i}")).collect()
}

#[test]
fn test_arity_bounds_hold_for_every_command() {
    let schema = builtin();
    assert!(!schema.is_empty());
    for command in schema.all_commands() {
        assert!(command.min_args <= command.max_args, "{}", command.name);
        assert_eq!(command.max_args, command.arguments.len(), "{}", command.name);
    }
}

#[test]
fn test_positional_round_trip_for_every_command() {
    for command in builtin().all_commands() {
        let values = placeholder_values(command.max_args);
        let reconciled = reconcile(command, values.as_slice()).unwrap();
        assert_eq!(reconciled, values, "{}", command.name);
    }
}

#[test]
fn test_keyword_form_matches_positional_form() {
    for command in builtin().all_commands() {
        let values = placeholder_values(command.max_args);

        // 关键字以逆序给出
        let mut tokens = Vec::new();
        for (spec, value) in command.arguments.iter().zip(&values).rev() {
            tokens.push(format!("--{}", spec.name));
            tokens.push(value.clone());
        }

        let reconciled = reconcile(command, tokens.as_slice()).unwrap();
        assert_eq!(reconciled, values, "{}", command.name);
    }
}

#[test]
fn test_mixed_keyword_and_positional() {
    let command = builtin().lookup("register_subdomain").unwrap();
    let tokens = [
        "--gaia_hub",
        "https://hub.blockstack.org",
        "alice.personal.id",
        OWNER_KEY,
        "https://registrar.blockstack.org",
    ];

    let reconciled = reconcile(command, tokens.as_slice()).unwrap();
    assert_eq!(
        reconciled,
        vec![
            "alice.personal.id",
            OWNER_KEY,
            "https://hub.blockstack.org",
            "https://registrar.blockstack.org",
        ]
    );
    assert!(validate_command(command, reconciled.as_slice()).is_ok());
}

#[test]
fn test_duplicate_keyword_is_rejected() {
    for command in builtin().all_commands() {
        let Some(first) = command.arguments.first() else {
            continue;
        };
        let flag = format!("--{}", first.name);
        let tokens = [flag.as_str(), "a", flag.as_str(), "a"];
        assert_eq!(
            reconcile(command, &tokens),
            Err(ArgParseError::DuplicateArgument(first.name.to_string())),
            "{}",
            command.name
        );
    }
}

#[test]
fn test_unknown_keyword_is_rejected() {
    for command in builtin().all_commands() {
        assert_eq!(
            reconcile(command, &["--no_such_argument", "x"]),
            Err(ArgParseError::UnknownArgument("no_such_argument".to_string())),
            "{}",
            command.name
        );
    }
}

#[test]
fn test_missing_keyword_value() {
    let command = builtin().lookup("balance").unwrap();
    assert_eq!(
        reconcile(command, &["--address"]),
        Err(ArgParseError::MissingValue("address".to_string()))
    );
}

#[test]
fn test_too_few_values_is_invalid() {
    let schema = builtin();
    for command in schema.all_commands().iter().filter(|c| c.min_args > 0) {
        let values = placeholder_values(command.min_args - 1);
        let result = validate(schema, command.name, values.as_slice());
        assert!(
            matches!(result, Err(ArgParseError::InvalidArguments { .. })),
            "{}",
            command.name
        );
    }
}

#[test]
fn test_balance_example() {
    let schema = builtin();
    let balance = schema.lookup("balance").unwrap();
    assert_eq!((balance.min_args, balance.max_args), (1, 1));

    let args = reconcile(balance, &[ADDRESS]).unwrap();
    assert_eq!(args, vec![ADDRESS]);
    assert!(validate(schema, "balance", args.as_slice()).is_ok());

    let args = reconcile(balance, &["bad addr"]).unwrap();
    let err = validate(schema, "balance", args.as_slice()).unwrap_err();
    assert!(matches!(err, ArgParseError::InvalidArguments { .. }));
    assert_eq!(err.to_string(), "Invalid command arguments");
}

#[test]
fn test_register_subdomain_arity() {
    let schema = builtin();
    let command = schema.lookup("register_subdomain").unwrap();
    assert_eq!((command.min_args, command.max_args), (4, 5));

    let four = [
        "alice.personal.id",
        OWNER_KEY,
        "https://hub.blockstack.org",
        "https://registrar.blockstack.org",
    ];
    let args = reconcile(command, &four).unwrap();
    assert!(validate(schema, "register_subdomain", args.as_slice()).is_ok());

    let args = reconcile(command, &four[..3]).unwrap();
    assert!(validate(schema, "register_subdomain", args.as_slice()).is_err());
}

#[test]
fn test_pattern_failure_with_correct_arity() {
    let outcome = parse_command_args(builtin(), &["get_account_at", ADDRESS, "latest"]);
    match outcome {
        ParseOutcome::Failure {
            error,
            command,
            show_usage,
        } => {
            assert!(matches!(error, ArgParseError::InvalidArguments { .. }));
            assert_eq!(command.as_deref(), Some("get_account_at"));
            assert!(show_usage);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_help_and_unknown_usage_fall_back_to_command_list() {
    let schema = builtin();
    let list = all_commands_list(schema);
    assert_eq!(command_usage(schema, "help"), list);
    assert_eq!(command_usage(schema, "no_such_command"), list);
    assert_ne!(command_usage(schema, "balance"), list);
}

#[test]
fn test_full_reference_lists_every_command() {
    let schema = builtin();
    let reference = full_reference(schema);
    for command in schema.all_commands() {
        assert!(reference.contains(command.name), "{}", command.name);
    }
}

#[test]
fn test_option_parser_example() {
    let table = parse_options(&["-C", "abc123", "-e", "positional1"], "eitUxC:");

    assert!(table.flag('e'));
    for option in ['i', 't', 'U', 'x'] {
        assert_eq!(table.get(option), Some(&OptionValue::Switch(false)));
    }
    assert_eq!(table.value('C'), Some("abc123"));
    assert_eq!(table.remaining, vec!["positional1"]);
}

#[test]
fn test_full_invocation() {
    let table = parse_options(
        &["-t", "get_blockchain_history", "--page", "2", "alice.id"],
        GLOBAL_OPTION_SPEC,
    );
    assert!(table.flag('t'));

    let outcome = parse_command_args(builtin(), table.remaining.as_slice());
    assert_eq!(
        outcome,
        ParseOutcome::Success {
            command: "get_blockchain_history".to_string(),
            args: vec!["alice.id".to_string(), "2".to_string()],
        }
    );
}

#[test]
fn test_no_command_and_unrecognized_command() {
    let schema = builtin();
    let empty: [&str; 0] = [];

    match parse_command_args(schema, &empty) {
        ParseOutcome::Failure { error, command, .. } => {
            assert_eq!(error, ArgParseError::NoCommandGiven);
            assert_eq!(command, None);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let outcome = parse_command_args(schema, &["frobnicate"]);
    assert_eq!(outcome.usage(schema), Some(all_commands_list(schema)));
}

#[test]
fn test_surplus_positional_is_ignored() {
    let schema = builtin();
    let balance = schema.lookup("balance").unwrap();

    let args = reconcile(balance, &[ADDRESS, "extra"]).unwrap();
    assert!(args.len() <= balance.max_args);
    assert_eq!(args, vec![ADDRESS]);

    let outcome = parse_command_args(schema, &["balance", ADDRESS, "extra"]);
    assert_eq!(
        outcome,
        ParseOutcome::Success {
            command: "balance".to_string(),
            args: vec![ADDRESS.to_string()],
        }
    );
}
