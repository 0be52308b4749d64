//! # Sale Ledger
//!
//! Append-oriented in-memory list of sales, mirrored to a file.
//!
//! ## Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Most-Recent-First Invariant                            │
//! │                                                                         │
//! │  On load:  read file → decode → sort descending by timestamp            │
//! │            (the file may have been edited or merged out of order)       │
//! │                                                                         │
//! │  On add:   insert at the FRONT of the cache, rewrite the file,          │
//! │            so cache order and file order stay identical                 │
//! │                                                                         │
//! │  get_all() therefore always returns newest → oldest                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sales are immutable once recorded: `update` always fails by design, the
//! only mutation besides `add` is a corrective `delete`.

use chrono::Local;
use tracing::{debug, warn};

use shopkeep_core::codec::LineRecord;
use shopkeep_core::{Money, Sale};

use crate::error::{LedgerError, LedgerResult};
use crate::line_store::LineStore;
use crate::repository::SaleRepository;

/// File-backed sale ledger.
pub struct SaleLedger {
    store: Box<dyn LineStore>,
    file_name: String,
    sales: Vec<Sale>,
}

impl SaleLedger {
    /// Creates the ledger: ensures the backing file exists, then loads the
    /// cache from it sorted most-recent-first.
    pub fn new(store: Box<dyn LineStore>, file_name: impl Into<String>) -> Self {
        let mut ledger = SaleLedger {
            store,
            file_name: file_name.into(),
            sales: Vec::new(),
        };
        ledger.store.initialize(&ledger.file_name);
        ledger.reload();
        ledger
    }

    fn reload(&mut self) {
        let lines = self.store.read_lines(&self.file_name);
        let total = lines.len();

        self.sales = lines
            .iter()
            .filter_map(|line| Sale::from_line(line))
            .collect();
        self.sales
            .sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));

        let dropped = total - self.sales.len();
        if dropped > 0 {
            warn!(file = %self.file_name, dropped, "Discarded malformed sale lines");
        }
        debug!(file = %self.file_name, count = self.sales.len(), "Sale ledger loaded");
    }

    fn persist(&self) {
        let lines: Vec<String> = self.sales.iter().map(Sale::to_line).collect();
        self.store.write_lines(&self.file_name, &lines);
    }

    /// Epoch milliseconds of today's local midnight.
    fn start_of_today_ms() -> i64 {
        let today = Local::now().date_naive();
        today
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| midnight.and_local_timezone(Local).single())
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_default()
    }
}

impl SaleRepository for SaleLedger {
    fn get_all(&self) -> Vec<Sale> {
        self.sales.clone()
    }

    fn get_by_id(&self, id: &str) -> Option<Sale> {
        self.sales.iter().find(|s| s.id == id).cloned()
    }

    fn add(&mut self, sale: Sale) -> LedgerResult<()> {
        debug!(id = %sale.id, product_id = %sale.product_id, quantity = sale.quantity, "Recording sale");
        self.sales.insert(0, sale);
        self.persist();
        Ok(())
    }

    fn update(&mut self, sale: Sale) -> LedgerResult<()> {
        // Deliberate policy, not an omission: recorded sales never change.
        warn!(id = %sale.id, "Rejected attempt to update an immutable sale");
        Err(LedgerError::Immutable { entity: "Sale" })
    }

    fn delete(&mut self, id: &str) -> bool {
        let before = self.sales.len();
        self.sales.retain(|s| s.id != id);
        let removed = self.sales.len() < before;

        if removed {
            debug!(id = %id, "Deleted sale (correction)");
            self.persist();
        }
        removed
    }

    fn count(&self) -> usize {
        self.sales.len()
    }

    fn sales_by_product(&self, product_id: &str) -> Vec<Sale> {
        self.sales
            .iter()
            .filter(|s| s.product_id == product_id)
            .cloned()
            .collect()
    }

    fn sales_in_range(&self, start_ms: i64, end_ms: i64) -> Vec<Sale> {
        self.sales
            .iter()
            .filter(|s| s.timestamp_ms >= start_ms && s.timestamp_ms <= end_ms)
            .cloned()
            .collect()
    }

    fn total_revenue(&self) -> Money {
        self.sales.iter().map(Sale::total).sum()
    }

    fn today_sales(&self) -> Vec<Sale> {
        let midnight = Self::start_of_today_ms();
        self.sales
            .iter()
            .filter(|s| s.timestamp_ms >= midnight)
            .cloned()
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_store::MemoryLineStore;
    use chrono::Utc;

    const FILE: &str = "sales.txt";

    fn sale(id: &str, product_id: &str, quantity: i64, cents: i64, timestamp_ms: i64) -> Sale {
        Sale {
            id: id.to_string(),
            product_id: product_id.to_string(),
            product_name: "Milk".to_string(),
            quantity,
            price_per_unit: Money::from_cents(cents),
            timestamp_ms,
        }
    }

    fn ledger_with(store: &MemoryLineStore) -> SaleLedger {
        SaleLedger::new(Box::new(store.clone()), FILE)
    }

    #[test]
    fn test_add_inserts_at_front() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        ledger.add(sale("S1", "P1", 5, 250, 1000)).unwrap();
        ledger.add(sale("S2", "P1", 2, 250, 2000)).unwrap();

        let all = ledger.get_all();
        assert_eq!(all[0].id, "S2");
        assert_eq!(all[1].id, "S1");

        // file order mirrors cache order
        let lines = store.read_lines(FILE);
        assert!(lines[0].starts_with("S2,"));
        assert!(lines[1].starts_with("S1,"));
    }

    #[test]
    fn test_load_sorts_descending_by_timestamp() {
        let store = MemoryLineStore::new();
        store.write_lines(
            FILE,
            &[
                sale("S1", "P1", 1, 250, 3000).to_line(),
                sale("S2", "P1", 1, 250, 9000).to_line(),
                sale("S3", "P1", 1, 250, 1000).to_line(),
                sale("S4", "P1", 1, 250, 5000).to_line(),
            ],
        );

        let ledger = ledger_with(&store);
        let timestamps: Vec<i64> = ledger.get_all().iter().map(|s| s.timestamp_ms).collect();
        assert_eq!(timestamps, vec![9000, 5000, 3000, 1000]);
    }

    #[test]
    fn test_update_always_fails() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        let recorded = sale("S1", "P1", 5, 250, 1000);
        ledger.add(recorded.clone()).unwrap();

        let mut tampered = recorded;
        tampered.quantity = 50;
        assert!(matches!(
            ledger.update(tampered),
            Err(LedgerError::Immutable { .. })
        ));
        assert_eq!(ledger.get_by_id("S1").unwrap().quantity, 5);
    }

    #[test]
    fn test_delete_is_the_correction_path() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        ledger.add(sale("S1", "P1", 5, 250, 1000)).unwrap();
        assert!(ledger.delete("S1"));
        assert!(!ledger.delete("S1"));
        assert_eq!(ledger.count(), 0);
        assert!(store.read_lines(FILE).is_empty());
    }

    #[test]
    fn test_sales_by_product() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        ledger.add(sale("S1", "P1", 1, 250, 1000)).unwrap();
        ledger.add(sale("S2", "P2", 1, 180, 2000)).unwrap();
        ledger.add(sale("S3", "P1", 3, 250, 3000)).unwrap();

        let hits = ledger.sales_by_product("P1");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|s| s.product_id == "P1"));
    }

    #[test]
    fn test_sales_in_range_is_inclusive_both_ends() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        ledger.add(sale("S1", "P1", 1, 250, 1000)).unwrap();
        ledger.add(sale("S2", "P1", 1, 250, 2000)).unwrap();
        ledger.add(sale("S3", "P1", 1, 250, 3000)).unwrap();

        let hits = ledger.sales_in_range(1000, 2000);
        let ids: Vec<&str> = hits.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S2", "S1"]);
    }

    #[test]
    fn test_total_revenue() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        assert_eq!(ledger.total_revenue(), Money::zero());

        ledger.add(sale("S1", "P1", 5, 250, 1000)).unwrap(); // 12.50
        ledger.add(sale("S2", "P2", 2, 180, 2000)).unwrap(); //  3.60
        assert_eq!(ledger.total_revenue(), Money::from_cents(1610));
    }

    #[test]
    fn test_today_sales_filters_by_local_midnight() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        let now_ms = Utc::now().timestamp_millis();
        let two_days_ago_ms = now_ms - 2 * 24 * 60 * 60 * 1000;

        ledger.add(sale("OLD", "P1", 1, 250, two_days_ago_ms)).unwrap();
        ledger.add(sale("NOW", "P1", 1, 250, now_ms)).unwrap();

        let today = ledger.today_sales();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].id, "NOW");
    }
}
