//! Demo: three flatmates netting a weekend trip's expenses.
//!
//! Run: cargo run --example netting_demo

use split_ledger::Ledger;

fn print_balances(ledger: &Ledger) {
    for (creditor, debtors) in ledger.creditors() {
        for (debtor, record) in debtors {
            if record.owes > 0 {
                println!("   {} owes {}: {}", debtor, creditor, record.owes);
            }
        }
    }
    println!();
}

fn main() -> split_ledger::error::Result<()> {
    let mut ledger = Ledger::new();

    println!("=== Trip Netting Demo ===\n");

    println!("1. Alice pays 3000 for the cabin, Bob's half is 1500");
    ledger.add("alice", "bob", 1500, 0)?;
    println!("2. Alice also covers Carol's half");
    ledger.add("alice", "carol", 1500, 1)?;
    print_balances(&ledger);

    println!("3. Bob pays 900 for groceries, Alice's share is 300");
    ledger.add("bob", "alice", 300, 2)?;
    println!("4. Carol pays 2400 for the car, Alice's share is 800");
    ledger.add("carol", "alice", 800, 3)?;
    print_balances(&ledger);

    println!("5. Audit trail of Bob's cabin share:");
    let record = ledger.record("alice", "bob")?.expect("pair exists");
    for debt in &record.debts {
        println!("   expense {} (outstanding {})", debt.expense_id, debt.current_amount());
        for entry in &debt.history {
            println!(
                "      {:+} via expense {} -> {}",
                entry.grants, entry.expense_id, entry.amount
            );
        }
    }

    println!("\n6. Ledger survives a text round-trip:");
    let text = ledger.to_text()?;
    let restored = Ledger::from_text(&text)?;
    assert_eq!(restored, ledger);
    println!("   {} bytes, identical after restore", text.len());

    println!("\n=== Done ===");
    Ok(())
}
