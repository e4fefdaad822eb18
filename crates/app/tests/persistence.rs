use duesbook_app::Club;
use duesbook_core::{ClubConfig, PaymentKey, PaymentStatus};
use duesbook_report::StaticReportGenerator;
use duesbook_storage::SqliteStore;

fn open_club(path: &str) -> Result<Club, Box<dyn std::error::Error>> {
    let store = SqliteStore::open(path)?;
    Ok(Club::open(
        Box::new(store),
        ClubConfig::default(),
        Box::new(StaticReportGenerator::new("offline")),
    )?)
}

// ============================================================================
// Seeding and reload
// ============================================================================

#[test]
fn a_fresh_store_is_seeded_with_the_example_roster() -> Result<(), Box<dyn std::error::Error>> {
    let club = Club::ephemeral()?;
    assert_eq!(club.ledger().members().len(), 3);
    assert!(club.ledger().payments().is_empty());
    assert!(club.ledger().transactions().is_empty());

    // Seed numbers are 1..3 and already in display order.
    let numbers: Vec<&str> = club
        .ledger()
        .members()
        .iter()
        .map(|m| m.member_number.as_str())
        .collect();
    assert_eq!(numbers, vec!["1", "2", "3"]);
    Ok(())
}

#[test]
fn state_survives_a_reopen() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("club.db");
    let path = path.to_str().unwrap();

    let member_id = {
        let mut club = open_club(path)?;
        let member_id = club.ledger().members()[0].id;
        club.toggle_payment(member_id, 0, 2024)?;
        club.toggle_payment(member_id, 1, 2024)?;
        club.toggle_payment(member_id, 1, 2024)?;
        member_id
    };

    let club = open_club(path)?;
    assert_eq!(club.ledger().members().len(), 3);

    // January stayed paid with its dues entry; February round-tripped to
    // unpaid with no entry.
    let jan = club.ledger().find_payment(member_id, 0, 2024).unwrap();
    assert_eq!(jan.status, PaymentStatus::Paid);
    let jan_key = PaymentKey::derive(member_id, 0, 2024);
    assert_eq!(club.ledger().transactions_by_payment_key(&jan_key).len(), 1);

    let feb = club.ledger().find_payment(member_id, 1, 2024).unwrap();
    assert_eq!(feb.status, PaymentStatus::Unpaid);
    let feb_key = PaymentKey::derive(member_id, 1, 2024);
    assert!(club.ledger().transactions_by_payment_key(&feb_key).is_empty());
    Ok(())
}

#[test]
fn the_seed_is_written_on_first_open() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("club.db");
    let path = path.to_str().unwrap();

    // Open and immediately drop without performing any mutation.
    {
        let _ = open_club(path)?;
    }

    // The roster was still persisted, so the second open does not re-seed
    // fresh ids.
    let first = open_club(path)?.ledger().members()[0].id;
    let second = open_club(path)?.ledger().members()[0].id;
    assert_eq!(first, second);
    Ok(())
}
