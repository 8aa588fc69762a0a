//! CLI integration tests for Rota
//!
//! These tests verify the complete workflow from initialization through
//! the assignment lifecycle, ensuring commands work together correctly.

use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command instance for the rota binary
fn rota_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("rota"))
}

/// Create a temporary directory and initialize a rota project
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    rota_cmd().arg("init").arg(dir.path()).assert().success();
    dir
}

/// Pull the first `prefix`-style ID (e.g. `h-1a2b3c4`) out of command output
fn extract_id(stdout: &[u8], prefix: &str) -> String {
    let text = String::from_utf8_lossy(stdout);
    text.split(|c: char| c.is_whitespace() || c == '(' || c == ')' || c == ',')
        .find(|tok| tok.starts_with(prefix) && tok.len() == prefix.len() + 7)
        .unwrap_or_else(|| panic!("no {}… ID in output: {}", prefix, text))
        .to_string()
}

fn add_house(dir: &TempDir, name: &str) -> String {
    let output = rota_cmd()
        .current_dir(dir.path())
        .args(["house", "add", name])
        .output()
        .unwrap();
    assert!(output.status.success());
    extract_id(&output.stdout, "h-")
}

fn add_staff(dir: &TempDir, first: &str, last: &str, role: &str) -> String {
    let output = rota_cmd()
        .current_dir(dir.path())
        .args(["staff", "add", first, last, "--role", role])
        .output()
        .unwrap();
    assert!(output.status.success());
    extract_id(&output.stdout, "u-")
}

fn add_shift(dir: &TempDir, house: &str, scheduler: &str, date: &str, start: &str, end: &str) -> String {
    let output = rota_cmd()
        .current_dir(dir.path())
        .args([
            "shift", "add", "--house", house, "--date", date, "--start", start, "--end", end,
            "--actor", scheduler,
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    extract_id(&output.stdout, "s-")
}

fn create_assignment(dir: &TempDir, shift: &str, staff: &str, scheduler: &str) -> String {
    let output = rota_cmd()
        .current_dir(dir.path())
        .args([
            "assign", "create", "--shift", shift, "--staff", staff, "--actor", scheduler,
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    extract_id(&output.stdout, "g-")
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    rota_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized rota project"));

    assert!(dir.path().join(".rota").is_dir());
    assert!(dir.path().join(".rota/config.toml").is_file());
    assert!(dir.path().join(".rota/.gitignore").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    rota_cmd().arg("init").arg(dir.path()).assert().success();
    rota_cmd().arg("init").arg(dir.path()).assert().success();
}

#[test]
fn test_commands_require_project() {
    let dir = TempDir::new().unwrap();

    rota_cmd()
        .current_dir(dir.path())
        .args(["house", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a rota project"));
}

// =============================================================================
// Directory Tests
// =============================================================================

#[test]
fn test_house_add_and_list() {
    let dir = setup_project();

    rota_cmd()
        .current_dir(dir.path())
        .args(["house", "add", "Maple House", "--location", "12 Maple Rd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added house Maple House"));

    rota_cmd()
        .current_dir(dir.path())
        .args(["house", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maple House"))
        .stdout(predicate::str::contains("12 Maple Rd"));
}

#[test]
fn test_staff_add_and_list() {
    let dir = setup_project();
    add_staff(&dir, "Ada", "Lovelace", "staff");

    rota_cmd()
        .current_dir(dir.path())
        .args(["staff", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace"));
}

#[test]
fn test_deactivated_staff_hidden_unless_all() {
    let dir = setup_project();
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");

    rota_cmd()
        .current_dir(dir.path())
        .args(["staff", "deactivate", &staff])
        .assert()
        .success();

    rota_cmd()
        .current_dir(dir.path())
        .args(["staff", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace").not());

    rota_cmd()
        .current_dir(dir.path())
        .args(["staff", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace"));
}

// =============================================================================
// Shift Tests
// =============================================================================

#[test]
fn test_shift_add_overnight() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");

    rota_cmd()
        .current_dir(dir.path())
        .args([
            "shift", "add", "--house", &house, "--date", "2026-09-07", "--start", "20:00",
            "--end", "08:00", "--type", "night", "--actor", &scheduler,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ends next day"));
}

#[test]
fn test_shift_add_rejects_bad_time() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");

    rota_cmd()
        .current_dir(dir.path())
        .args([
            "shift", "add", "--house", &house, "--date", "2026-09-07", "--start", "25:00",
            "--end", "08:00", "--actor", &scheduler,
        ])
        .assert()
        .failure();
}

#[test]
fn test_shift_list_in_window() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");
    add_shift(&dir, &house, &scheduler, "2026-09-21", "08:00", "16:00");

    rota_cmd()
        .current_dir(dir.path())
        .args(["shift", "list", "--from", "2026-09-07", "--to", "2026-09-13"])
        .assert()
        .success()
        .stdout(predicate::str::contains(shift.as_str()))
        .stdout(predicate::str::contains("2026-09-21").not());
}

// =============================================================================
// Assignment Lifecycle Tests
// =============================================================================

#[test]
fn test_assign_create_and_accept() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");

    let assignment = create_assignment(&dir, &shift, &staff, &scheduler);

    rota_cmd()
        .current_dir(dir.path())
        .args(["assign", "accept", &assignment, "--actor", &staff])
        .assert()
        .success()
        .stdout(predicate::str::contains("Accepted"));

    rota_cmd()
        .current_dir(dir.path())
        .args(["assign", "list", "--status", "accepted"])
        .assert()
        .success()
        .stdout(predicate::str::contains(assignment.as_str()));
}

#[test]
fn test_assign_reject_frees_the_pair() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");

    let assignment = create_assignment(&dir, &shift, &staff, &scheduler);

    rota_cmd()
        .current_dir(dir.path())
        .args(["assign", "reject", &assignment, "--actor", &staff])
        .assert()
        .success();

    // A rejected assignment no longer blocks re-assigning the pair
    create_assignment(&dir, &shift, &staff, &scheduler);
}

#[test]
fn test_duplicate_active_assignment_fails() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");

    create_assignment(&dir, &shift, &staff, &scheduler);

    rota_cmd()
        .current_dir(dir.path())
        .args([
            "assign", "create", "--shift", &shift, "--staff", &staff, "--actor", &scheduler,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_scheduler_cannot_hold_assignments() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");

    rota_cmd()
        .current_dir(dir.path())
        .args([
            "assign", "create", "--shift", &shift, "--staff", &scheduler, "--actor", &scheduler,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_inactive_staff_cannot_be_assigned() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");

    rota_cmd()
        .current_dir(dir.path())
        .args(["staff", "deactivate", &staff])
        .assert()
        .success();

    rota_cmd()
        .current_dir(dir.path())
        .args([
            "assign", "create", "--shift", &shift, "--staff", &staff, "--actor", &scheduler,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("inactive"));
}

#[test]
fn test_only_assignee_may_respond() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let other = add_staff(&dir, "Grace", "Hopper", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");

    let assignment = create_assignment(&dir, &shift, &staff, &scheduler);

    rota_cmd()
        .current_dir(dir.path())
        .args(["assign", "accept", &assignment, "--actor", &other])
        .assert()
        .failure()
        .stderr(predicate::str::contains("assigned staff member"));
}

#[test]
fn test_overlapping_shifts_cannot_both_be_held() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let first = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");
    let second = add_shift(&dir, &house, &scheduler, "2026-09-08", "12:00", "20:00");

    create_assignment(&dir, &first, &staff, &scheduler);

    rota_cmd()
        .current_dir(dir.path())
        .args([
            "assign", "create", "--shift", &second, "--staff", &staff, "--actor", &scheduler,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("overlaps"));
}

#[test]
fn test_touching_shifts_are_fine() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let first = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "12:00");
    let second = add_shift(&dir, &house, &scheduler, "2026-09-08", "12:00", "16:00");

    create_assignment(&dir, &first, &staff, &scheduler);
    create_assignment(&dir, &second, &staff, &scheduler);
}

#[test]
fn test_daily_cap_requires_reasoned_override() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let first = add_shift(&dir, &house, &scheduler, "2026-09-08", "06:00", "09:00");
    let second = add_shift(&dir, &house, &scheduler, "2026-09-08", "10:00", "13:00");
    let third = add_shift(&dir, &house, &scheduler, "2026-09-08", "14:00", "17:00");

    create_assignment(&dir, &first, &staff, &scheduler);
    create_assignment(&dir, &second, &staff, &scheduler);

    // Third assignment on the same day trips the cap
    rota_cmd()
        .current_dir(dir.path())
        .args([
            "assign", "create", "--shift", &third, "--staff", &staff, "--actor", &scheduler,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("two assignments"));

    // Override without a reason does not count
    rota_cmd()
        .current_dir(dir.path())
        .args([
            "assign", "create", "--shift", &third, "--staff", &staff, "--actor", &scheduler,
            "--override",
        ])
        .assert()
        .failure();

    rota_cmd()
        .current_dir(dir.path())
        .args([
            "assign", "create", "--shift", &third, "--staff", &staff, "--actor", &scheduler,
            "--override", "--reason", "short-staffed after flu outbreak",
        ])
        .assert()
        .success();
}

#[test]
fn test_assign_update_moves_staff() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let other = add_staff(&dir, "Grace", "Hopper", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");

    let assignment = create_assignment(&dir, &shift, &staff, &scheduler);

    rota_cmd()
        .current_dir(dir.path())
        .args(["assign", "accept", &assignment, "--actor", &staff])
        .assert()
        .success();

    // Reassignment resets the record to pending for the new staff member
    rota_cmd()
        .current_dir(dir.path())
        .args([
            "assign", "update", &assignment, "--staff", &other, "--actor", &scheduler,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("pending"));

    rota_cmd()
        .current_dir(dir.path())
        .args(["assign", "list", "--staff", &other, "--status", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains(assignment.as_str()));
}

#[test]
fn test_assign_remove() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");

    let assignment = create_assignment(&dir, &shift, &staff, &scheduler);

    rota_cmd()
        .current_dir(dir.path())
        .args(["assign", "remove", &assignment, "--actor", &scheduler])
        .assert()
        .success();

    rota_cmd()
        .current_dir(dir.path())
        .args(["assign", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(assignment.as_str()).not());
}

// =============================================================================
// Shift Application Tests
// =============================================================================

fn apply_for_shift(dir: &TempDir, shift: &str, staff: &str) -> String {
    let output = rota_cmd()
        .current_dir(dir.path())
        .args(["application", "apply", "--shift", shift, "--actor", staff])
        .output()
        .unwrap();
    assert!(output.status.success());
    extract_id(&output.stdout, "a-")
}

#[test]
fn test_application_approve_creates_accepted_assignment() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");

    let application = apply_for_shift(&dir, &shift, &staff);

    let output = rota_cmd()
        .current_dir(dir.path())
        .args(["application", "approve", &application, "--actor", &scheduler])
        .output()
        .unwrap();
    assert!(output.status.success());
    let assignment = extract_id(&output.stdout, "g-");

    // Approval skips the pending window entirely
    rota_cmd()
        .current_dir(dir.path())
        .args(["assign", "list", "--status", "accepted"])
        .assert()
        .success()
        .stdout(predicate::str::contains(assignment.as_str()));

    rota_cmd()
        .current_dir(dir.path())
        .args(["journal", "notifications", &staff])
        .assert()
        .success()
        .stdout(predicate::str::contains("APPLICATION_APPROVED"));
}

#[test]
fn test_application_reject_notifies_applicant() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");

    let application = apply_for_shift(&dir, &shift, &staff);

    rota_cmd()
        .current_dir(dir.path())
        .args(["application", "reject", &application, "--actor", &scheduler])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rejected"));

    rota_cmd()
        .current_dir(dir.path())
        .args(["journal", "notifications", &staff])
        .assert()
        .success()
        .stdout(predicate::str::contains("APPLICATION_REJECTED"));

    // Decisions are final
    rota_cmd()
        .current_dir(dir.path())
        .args(["application", "approve", &application, "--actor", &scheduler])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already been decided"));
}

#[test]
fn test_duplicate_application_fails() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");

    apply_for_shift(&dir, &shift, &staff);

    rota_cmd()
        .current_dir(dir.path())
        .args(["application", "apply", "--shift", &shift, "--actor", &staff])
        .assert()
        .failure()
        .stderr(predicate::str::contains("application already exists"));
}

#[test]
fn test_assigned_staff_cannot_apply() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");

    create_assignment(&dir, &shift, &staff, &scheduler);

    rota_cmd()
        .current_dir(dir.path())
        .args(["application", "apply", "--shift", &shift, "--actor", &staff])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already assigned"));
}

#[test]
fn test_application_list_shows_week_window() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let inside = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");
    let outside = add_shift(&dir, &house, &scheduler, "2026-09-21", "08:00", "16:00");

    let wanted = apply_for_shift(&dir, &inside, &staff);
    let unwanted = apply_for_shift(&dir, &outside, &staff);

    rota_cmd()
        .current_dir(dir.path())
        .args(["application", "list", "--week", "2026-09-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains(wanted.as_str()))
        .stdout(predicate::str::contains(unwanted.as_str()).not())
        .stdout(predicate::str::contains("Ada Lovelace"));
}

// =============================================================================
// Week and Template Tests
// =============================================================================

#[test]
fn test_week_show_requires_monday() {
    let dir = setup_project();

    rota_cmd()
        .current_dir(dir.path())
        .args(["week", "show", "2026-09-08"])
        .assert()
        .failure();
}

#[test]
fn test_week_show_lists_shifts() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-09", "08:00", "16:00");
    create_assignment(&dir, &shift, &staff, &scheduler);

    rota_cmd()
        .current_dir(dir.path())
        .args(["week", "show", "2026-09-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maple House"))
        .stdout(predicate::str::contains("Ada Lovelace"));
}

#[test]
fn test_week_copy_clones_shifts_not_assignments() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-09", "08:00", "16:00");
    create_assignment(&dir, &shift, &staff, &scheduler);

    rota_cmd()
        .current_dir(dir.path())
        .args([
            "week", "copy", "--from", "2026-09-07", "--to", "2026-09-14", "--actor", &scheduler,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 1 shifts"));

    // The copy lands on the same weekday of the target week, unassigned
    rota_cmd()
        .current_dir(dir.path())
        .args(["shift", "list", "--from", "2026-09-14", "--to", "2026-09-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-09-16"));

    rota_cmd()
        .current_dir(dir.path())
        .args(["assign", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(shift.as_str()));
}

#[test]
fn test_week_copy_empty_source_fails() {
    let dir = setup_project();
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");

    rota_cmd()
        .current_dir(dir.path())
        .args([
            "week", "copy", "--from", "2026-09-07", "--to", "2026-09-14", "--actor", &scheduler,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No shifts"));
}

#[test]
fn test_template_create_and_apply() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    add_shift(&dir, &house, &scheduler, "2026-09-07", "08:00", "16:00");
    add_shift(&dir, &house, &scheduler, "2026-09-11", "20:00", "08:00");

    let output = rota_cmd()
        .current_dir(dir.path())
        .args([
            "template", "create", "Standard week", "--week", "2026-09-07", "--actor", &scheduler,
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let template = extract_id(&output.stdout, "p-");

    rota_cmd()
        .current_dir(dir.path())
        .args([
            "template", "apply", &template, "--week", "2026-09-21", "--actor", &scheduler,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 shifts created"));

    // Monday and Friday patterns land on the target week's Monday and Friday
    rota_cmd()
        .current_dir(dir.path())
        .args(["shift", "list", "--from", "2026-09-21", "--to", "2026-09-27"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-09-21"))
        .stdout(predicate::str::contains("2026-09-25"));
}

// =============================================================================
// Sweep and Journal Tests
// =============================================================================

#[test]
fn test_sweep_leaves_fresh_pending_alone() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");
    let assignment = create_assignment(&dir, &shift, &staff, &scheduler);

    rota_cmd()
        .current_dir(dir.path())
        .args(["sweep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to expire"));

    rota_cmd()
        .current_dir(dir.path())
        .args(["assign", "list", "--status", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains(assignment.as_str()));
}

#[test]
fn test_journal_audit_records_assignments() {
    let dir = setup_project();
    let house = add_house(&dir, "Maple House");
    let scheduler = add_staff(&dir, "Sam", "Planner", "scheduler");
    let staff = add_staff(&dir, "Ada", "Lovelace", "staff");
    let shift = add_shift(&dir, &house, &scheduler, "2026-09-08", "08:00", "16:00");
    let assignment = create_assignment(&dir, &shift, &staff, &scheduler);

    rota_cmd()
        .current_dir(dir.path())
        .args(["journal", "audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ASSIGN"))
        .stdout(predicate::str::contains(assignment.as_str()));

    rota_cmd()
        .current_dir(dir.path())
        .args(["journal", "notifications", &staff])
        .assert()
        .success()
        .stdout(predicate::str::contains("New shift assignment"));
}

// =============================================================================
// Output Format Tests
// =============================================================================

#[test]
fn test_json_output_is_parseable() {
    let dir = setup_project();
    add_house(&dir, "Maple House");

    let output = rota_cmd()
        .current_dir(dir.path())
        .args(["house", "list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["name"], "Maple House");
}
