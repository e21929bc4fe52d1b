use std::collections::HashMap;

use anchor_lang::prelude::*;
use proptest::prelude::*;

use gnp::accumulator::{record_purchase, Purchase};
use gnp::constants::NATIVE_TOKEN;
use gnp::events::GnpChanged;
use gnp::oracle::{OracleResolver, PriceOracle, TwapOracle};
use gnp::registry;
use gnp::state::{GnpState, LockRecord, OracleEntry, OracleKind, TwapFeed};

const LAMPORTS: u64 = 1_000_000_000;
const USDC_DECIMALS: u8 = 6;
const NOW: i64 = 1_700_003_600;

// 0.01% with a 1_000 lamport floor
const TOLERANCE_BPS: u128 = 1;
const MIN_TOLERANCE: u128 = 1_000;

fn assert_within_tolerance(expected: u128, actual: u128) {
    let allowed = (expected * TOLERANCE_BPS).div_ceil(10_000).max(MIN_TOLERANCE);
    assert!(
        expected.abs_diff(actual) <= allowed,
        "{actual} differs from {expected} by more than {allowed}"
    );
}

fn error_name(err: anchor_lang::error::Error) -> String {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_name.clone(),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Ledger fixture: state, one registered lock and a TWAP feed per priced token
struct Ledger {
    owner: Pubkey,
    state: GnpState,
    lock: Pubkey,
    lock_record: LockRecord,
    feeds: HashMap<Pubkey, TwapFeed>,
    now: i64,
    max_age_secs: u64,
}

impl Ledger {
    fn new() -> Self {
        let owner = Pubkey::new_unique();
        let lock = Pubkey::new_unique();
        Self {
            owner,
            state: GnpState::new(owner, Pubkey::new_unique(), 9, 255),
            lock,
            lock_record: LockRecord::new(lock, 254),
            feeds: HashMap::new(),
            now: NOW,
            max_age_secs: 3_600,
        }
    }

    /// Feed pricing one whole token at `prices[i]` lamports from `times[i]`
    fn add_feed(&mut self, token: Pubkey, decimals: u8, samples: &[(i64, u64)]) {
        let mut feed = TwapFeed::new(
            token,
            decimals,
            self.state.reference_asset,
            Pubkey::new_unique(),
            3_600,
            253,
        );
        for (timestamp, price) in samples {
            feed.record(*timestamp, *price).unwrap();
        }
        self.feeds.insert(token, feed);
    }

    fn purchase(&mut self, token: Pubkey, raw_amount: u64, events: &mut Vec<GnpChanged>) -> Result<u64> {
        let purchase = Purchase {
            token,
            raw_amount,
            lock: self.lock,
        };
        let resolver = FeedResolver {
            feeds: &self.feeds,
            now: self.now,
            max_age_secs: self.max_age_secs,
        };
        let record = record_purchase(&mut self.state, &mut self.lock_record, &resolver, purchase, events)?;
        Ok(record.converted_value)
    }

    /// Value the feed gives `raw_amount`, consulted outside the ledger
    fn consult(&self, token: Pubkey, raw_amount: u64) -> u64 {
        let feed = self.feeds[&token].clone();
        TwapOracle::new(feed, self.now, self.max_age_secs)
            .consult(&token, raw_amount, &self.state.reference_asset)
            .unwrap()
    }
}

struct FeedResolver<'a> {
    feeds: &'a HashMap<Pubkey, TwapFeed>,
    now: i64,
    max_age_secs: u64,
}

impl OracleResolver for FeedResolver<'_> {
    fn resolve(&self, token: &Pubkey) -> Result<Option<Box<dyn PriceOracle + '_>>> {
        Ok(self.feeds.get(token).map(|feed| {
            Box::new(TwapOracle::new(feed.clone(), self.now, self.max_age_secs)) as Box<dyn PriceOracle>
        }))
    }
}

fn usdc_ledger() -> (Ledger, Pubkey) {
    let mut ledger = Ledger::new();
    let usdc = Pubkey::new_unique();
    // 0.004 SOL per USDC, drifting to 0.0041 halfway through the window
    ledger.add_feed(usdc, USDC_DECIMALS, &[(NOW - 3_600, 4_000_000), (NOW - 1_800, 4_100_003)]);
    (ledger, usdc)
}

#[test]
fn five_stablecoin_purchases_match_independent_consult() {
    let (mut ledger, usdc) = usdc_ledger();
    let key_price = 50 * 10u64.pow(USDC_DECIMALS as u32);
    let mut events = Vec::new();

    for _ in 0..5 {
        ledger.purchase(usdc, key_price, &mut events).unwrap();
    }

    let expected = ledger.consult(usdc, key_price * 5);
    assert_within_tolerance(expected as u128, ledger.state.gross_network_product());

    assert_eq!(events.len(), 5);
    let last = events.last().unwrap();
    assert_eq!(last.gross_network_product, ledger.state.gross_network_product());
    assert_eq!(last.token_address, usdc);
    assert_eq!(last.raw_value, key_price);
    assert_eq!(last.lock_address, ledger.lock);
    assert_eq!(ledger.lock_record.purchase_count, 5);
    assert_eq!(ledger.lock_record.total_sales, ledger.state.gross_network_product());
}

#[test]
fn token_without_oracle_emits_zero_value() {
    let mut ledger = Ledger::new();
    let token = Pubkey::new_unique();
    let mut events = Vec::new();

    let value = ledger.purchase(token, 1_000_000, &mut events).unwrap();

    assert_eq!(value, 0);
    assert_eq!(ledger.state.gross_network_product(), 0);
    assert_eq!(ledger.state.purchase_count(), 1);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].value_in_canonical_unit, 0);
    assert_eq!(events[0].raw_value, 1_000_000);
    assert_eq!(events[0].gross_network_product, 0);
}

#[test]
fn native_purchase_is_counted_exactly() {
    let mut ledger = Ledger::new();
    let mut events = Vec::new();
    let price = LAMPORTS / 100;

    ledger.purchase(NATIVE_TOKEN, price, &mut events).unwrap();
    ledger.purchase(NATIVE_TOKEN, price, &mut events).unwrap();

    assert_eq!(ledger.state.gross_network_product(), 2 * price as u128);
    assert_eq!(events[0].gross_network_product, price as u128);
    assert_eq!(events[1].gross_network_product, 2 * price as u128);
    assert_eq!(events[1].value_in_canonical_unit, price);
}

#[test]
fn stale_oracle_fails_without_trace() {
    let (mut ledger, usdc) = usdc_ledger();
    let mut events = Vec::new();
    ledger.purchase(NATIVE_TOKEN, LAMPORTS, &mut events).unwrap();

    ledger.now += 7_200;
    let err = ledger.purchase(usdc, 50_000_000, &mut events).unwrap_err();

    assert_eq!(error_name(err), "StalePrice");
    assert_eq!(ledger.state.gross_network_product(), LAMPORTS as u128);
    assert_eq!(ledger.state.purchase_count(), 1);
    assert_eq!(ledger.lock_record.purchase_count, 1);
    assert_eq!(events.len(), 1);
}

#[test]
fn unknown_lock_is_rejected() {
    let mut ledger = Ledger::new();
    let mut events = Vec::new();
    ledger.lock = Pubkey::new_unique();

    let err = ledger.purchase(NATIVE_TOKEN, LAMPORTS, &mut events).unwrap_err();

    assert_eq!(error_name(err), "UnknownLock");
    assert_eq!(ledger.state.gross_network_product(), 0);
    assert!(events.is_empty());
}

#[test]
fn lock_total_overflow_fails_without_trace() {
    let mut ledger = Ledger::new();
    let mut events = Vec::new();
    ledger.purchase(NATIVE_TOKEN, LAMPORTS, &mut events).unwrap();

    ledger.lock_record.total_sales = u128::MAX;
    let err = ledger.purchase(NATIVE_TOKEN, 1, &mut events).unwrap_err();

    assert_eq!(error_name(err), "MathOverflow");
    assert_eq!(ledger.state.gross_network_product(), LAMPORTS as u128);
    assert_eq!(ledger.state.purchase_count(), 1);
    assert_eq!(ledger.lock_record.total_sales, u128::MAX);
    assert_eq!(ledger.lock_record.purchase_count, 1);
    assert_eq!(events.len(), 1);
}

#[test]
fn reconfigured_oracle_applies_to_later_purchases_only() {
    let (mut ledger, usdc) = usdc_ledger();
    let mut events = Vec::new();
    let amount = 10_000_000;

    let first = ledger.purchase(usdc, amount, &mut events).unwrap();
    ledger.add_feed(usdc, USDC_DECIMALS, &[(NOW - 3_600, 8_000_000)]);
    let second = ledger.purchase(usdc, amount, &mut events).unwrap();

    assert_eq!(second, 80_000_000);
    assert!(second > first);
    assert_eq!(events[0].value_in_canonical_unit, first);
    assert_eq!(ledger.state.gross_network_product(), (first + second) as u128);
}

#[test]
fn registry_roundtrip_through_owner_writes() {
    let ledger = Ledger::new();
    let token = Pubkey::new_unique();
    let oracle = Pubkey::new_unique();
    let mut entry = OracleEntry {
        token: Pubkey::default(),
        oracle: Pubkey::default(),
        kind: OracleKind::Twap,
        token_decimals: 0,
        bump: 0,
    };

    let err = registry::set_oracle(
        &ledger.state,
        &Pubkey::new_unique(),
        &mut entry,
        token,
        6,
        oracle,
        OracleKind::Twap,
        250,
    )
    .unwrap_err();
    assert_eq!(error_name(err), "Unauthorized");
    assert_eq!(registry::get_oracle(Some(&entry)), None);

    registry::set_oracle(&ledger.state, &ledger.owner, &mut entry, token, 6, oracle, OracleKind::Twap, 250)
        .unwrap();
    assert_eq!(registry::get_oracle(Some(&entry)), Some(oracle));
}

#[derive(Clone, Copy, Debug)]
enum Paid {
    Native,
    Unpriced,
    Usdc,
}

fn paid_strategy() -> impl Strategy<Value = Paid> {
    prop_oneof![Just(Paid::Native), Just(Paid::Unpriced), Just(Paid::Usdc)]
}

proptest! {
    #[test]
    fn event_stream_replays_running_total(
        purchases in prop::collection::vec((paid_strategy(), 0u64..1_000_000_000_000), 1..40)
    ) {
        let (mut ledger, usdc) = usdc_ledger();
        let unpriced = Pubkey::new_unique();
        let mut events = Vec::new();

        for (paid, amount) in &purchases {
            let token = match paid {
                Paid::Native => NATIVE_TOKEN,
                Paid::Unpriced => unpriced,
                Paid::Usdc => usdc,
            };
            let value = ledger.purchase(token, *amount, &mut events).unwrap();
            match paid {
                Paid::Native => prop_assert_eq!(value, *amount),
                Paid::Unpriced => prop_assert_eq!(value, 0),
                Paid::Usdc => prop_assert_eq!(value, ledger.consult(usdc, *amount)),
            }
        }

        prop_assert_eq!(events.len(), purchases.len());

        let mut replayed: u128 = 0;
        for event in &events {
            replayed += event.value_in_canonical_unit as u128;
            prop_assert_eq!(event.gross_network_product, replayed);
            prop_assert_eq!(event.lock_address, ledger.lock);
        }
        prop_assert_eq!(replayed, ledger.state.gross_network_product());
        prop_assert_eq!(ledger.state.purchase_count(), purchases.len() as u64);
    }
}
