use clap::CommandFactory;
use rstest::rstest;

use super::*;

#[rstest]
fn test_cli_is_well_formed() {
    Options::command().debug_assert();
}

#[rstest]
#[case::create_pod(&["cpctl", "create-pod", "p1", "nginx"])]
#[case::get_pod(&["cpctl", "get-pod", "p1"])]
#[case::list_pods(&["cpctl", "list-pods"])]
#[case::delete_pod(&["cpctl", "delete-pod", "p1"])]
#[case::watch_pods(&["cpctl", "watch-pods"])]
#[case::create_node(&["cpctl", "create-node", "n1", "http://n1:8081"])]
#[case::get_node(&["cpctl", "get-node", "n1"])]
#[case::list_nodes(&["cpctl", "list-nodes", "--status", "Ready"])]
#[case::delete_node(&["cpctl", "delete-node", "n1"])]
#[case::watch_nodes(&["cpctl", "watch-nodes"])]
fn test_subcommands_parse(#[case] argv: &[&str]) {
    Options::parse_from(argv);
}

#[rstest]
fn test_namespace_defaults_to_default_namespace() {
    let opts = Options::parse_from(["cpctl", "get-pod", "p1"]);
    let CpCommand::GetPod(args) = opts.command else {
        panic!("expected GetPod");
    };
    assert_eq!(args.namespace, DEFAULT_NAMESPACE);
}
