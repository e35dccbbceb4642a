mod common;
use common::cli::{ShelfWorkspace, initialized_workspace, run_ok, run_shelf};
use std::fs;

fn stocked_workspace() -> ShelfWorkspace {
    let workspace = initialized_workspace();
    run_ok(&workspace, ["add", "Dune", "Frank Herbert"], "add_dune");
    run_ok(&workspace, ["add", "Emma", "Jane Austen"], "add_emma");
    run_ok(
        &workspace,
        ["add", "The Hobbit", "J. R. R. Tolkien", "--key", "hobbit"],
        "add_hobbit",
    );
    run_ok(&workspace, ["borrow", "Dune", "Alice"], "borrow_dune");
    workspace
}

#[test]
fn test_list_all_and_available() {
    let workspace = stocked_workspace();

    let all = run_ok(&workspace, ["list"], "list");
    assert!(all.stdout.contains("● Dune by Frank Herbert (borrowed by Alice)"));
    assert!(all.stdout.contains("○ Emma by Jane Austen"));
    assert!(all.stdout.contains("○ hobbit: The Hobbit by J. R. R. Tolkien"));
    assert!(all.stdout.contains("3 book(s): 2 available, 1 borrowed, 0 waiting"));

    let available = run_ok(&workspace, ["list", "--available"], "list_available");
    assert!(!available.stdout.contains("Dune"));
    assert!(available.stdout.contains("Emma"));

    let borrowed = run_ok(&workspace, ["ls", "--borrowed", "--json"], "list_borrowed").json();
    let keys: Vec<&str> = borrowed
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["Dune"]);
}

#[test]
fn test_list_sort_aliases_are_accepted() {
    let workspace = stocked_workspace();

    let by_author = run_ok(&workspace, ["list", "--json", "--sort", "author"], "by_author").json();
    let authors: Vec<&str> = by_author
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["author"].as_str().unwrap())
        .collect();
    assert_eq!(authors, vec!["Frank Herbert", "J. R. R. Tolkien", "Jane Austen"]);

    run_ok(&workspace, ["list", "--sort", "name", "--reverse"], "by_name");

    let bad = run_shelf(&workspace, ["list", "--sort", "pages"], "bad_sort");
    assert_eq!(bad.code(), Some(2));
    assert!(bad.stderr.contains("unknown sort field"));
}

#[test]
fn test_list_empty_catalog() {
    let workspace = initialized_workspace();
    let out = run_ok(&workspace, ["list"], "list_empty");
    assert!(out.stdout.contains("No books found."));
}

#[test]
fn test_search_matches_title_and_author() {
    let workspace = stocked_workspace();

    let out = run_ok(&workspace, ["search", "tolkien"], "search_author");
    assert!(out.stdout.contains("hobbit"));
    assert!(out.stdout.contains("1 match(es)"));

    let out = run_ok(&workspace, ["find", "EMMA", "--json"], "search_title").json();
    assert_eq!(out.as_array().unwrap().len(), 1);

    let out = run_ok(&workspace, ["search", "Pratchett"], "search_none");
    assert!(out.stdout.contains("No books match 'Pratchett'."));
}

#[test]
fn test_show_details() {
    let workspace = stocked_workspace();
    run_ok(&workspace, ["borrow", "Dune", "Bob"], "queue_bob");

    let out = run_ok(&workspace, ["show", "Dune"], "show");
    assert!(out.stdout.contains("Author:   Frank Herbert"));
    assert!(out.stdout.contains("borrowed by Alice since"));
    assert!(out.stdout.contains("Waitlist: [Bob]"));

    let details = run_ok(&workspace, ["show", "Dune", "--json"], "show_json").json();
    assert_eq!(details["waitlist_length"], 1);
    assert_eq!(details["next_in_line"], "Bob");
}

#[test]
fn test_edit_keeps_key() {
    let workspace = stocked_workspace();
    let out = run_ok(
        &workspace,
        ["edit", "hobbit", "--title", "The Hobbit, or There and Back Again"],
        "edit",
    );
    assert!(out.stdout.contains("Updated ○ hobbit: The Hobbit, or There and Back Again"));

    let nothing = run_shelf(&workspace, ["edit", "hobbit"], "edit_nothing");
    assert_eq!(nothing.code(), Some(2));
    assert!(nothing.stderr.contains("Nothing to do"));
}

#[test]
fn test_export_report() {
    let workspace = stocked_workspace();
    let out = run_ok(&workspace, ["export", "report.txt"], "export");
    assert!(out.stdout.contains("Exported 3 book(s)"));

    let report = fs::read_to_string(workspace.root.join("report.txt")).unwrap();
    assert!(report.starts_with("Library Catalog Export\n"));
    assert!(report.contains("Generated on: "));
    assert!(report.contains("Total: 3 (2 available, 1 borrowed)"));
}

#[test]
fn test_export_empty_catalog_writes_nothing() {
    let workspace = initialized_workspace();
    let out = run_ok(&workspace, ["export"], "export_empty");
    assert!(out.stdout.contains("No books to export."));
    assert!(!workspace.root.join("catalog.txt").exists());
}
