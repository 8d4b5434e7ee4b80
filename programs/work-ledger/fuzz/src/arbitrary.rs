//! Arbitrary input generators for fuzz testing
//!
//! Generates inputs for the ledger instructions, biased towards the edges of
//! each accepted range.

use proptest::prelude::*;

/// Fixed pool of descriptions. Drawing from a small pool makes repeated
/// `(work_type, description)` pairs, and so cooldown conflicts, common.
pub const DESCRIPTION_POOL: [&str; 8] = [
    "Onboarded new user John Doe",
    "Wrote blog post about staking",
    "Fixed off-by-one in pagination",
    "Referred Acme Corp",
    "Closed enterprise deal",
    "Moderated community call",
    "Reported crash on login",
    "Documented the emission schedule",
];

/// Arbitrary work type tag, including out-of-range tags
pub fn arb_work_type_tag() -> impl Strategy<Value = u8> {
    prop_oneof![
        // Valid catalog tags (most tests)
        8 => 0u8..=9u8,
        // Unknown tags
        1 => Just(10u8),
        1 => 11u8..=255u8,
    ]
}

/// Valid work type tag only
pub fn arb_valid_work_type_tag() -> impl Strategy<Value = u8> {
    0u8..=9u8
}

/// Arbitrary effort weight in basis points with edge cases
/// Default accepted range is 5000-20000
pub fn arb_effort_bps() -> impl Strategy<Value = u16> {
    prop_oneof![
        // Edge cases
        Just(0u16),
        Just(4999u16),
        Just(5000u16),  // 0.5x
        Just(10000u16), // 1.0x
        Just(20000u16), // 2.0x
        Just(20001u16),
        Just(u16::MAX),
        // Inside the default range
        5000u16..=20000u16,
        // Anywhere
        any::<u16>(),
    ]
}

/// Effort weight inside the default accepted range
pub fn arb_valid_effort_bps() -> impl Strategy<Value = u16> {
    5000u16..=20000u16
}

/// Arbitrary description with edge cases
pub fn arb_description() -> impl Strategy<Value = String> {
    prop_oneof![
        // Pool entries (cooldown collisions)
        4 => (0usize..DESCRIPTION_POOL.len()).prop_map(|i| DESCRIPTION_POOL[i].to_string()),
        // Free text
        2 => "[a-zA-Z0-9 ]{1,64}",
        // Empty and blank
        1 => Just(String::new()),
        1 => Just("   ".to_string()),
        // Over the 256-byte limit
        1 => Just("x".repeat(257)),
        // Control characters
        1 => Just("line one\nline two".to_string()),
    ]
}

/// Decay rate in basis points (0-10000)
pub fn arb_decay_rate() -> impl Strategy<Value = u16> {
    prop_oneof![
        Just(0u16),
        Just(1u16),
        Just(100u16), // 1% default
        Just(10000u16),
        0u16..=10000u16,
    ]
}

/// Decay period in seconds
pub fn arb_decay_period() -> impl Strategy<Value = i64> {
    prop_oneof![
        Just(1i64),
        Just(3600i64),
        Just(86_400i64), // 1 day default
        1i64..=31_536_000i64,
    ]
}

/// Pending balance with edge cases
pub fn arb_balance() -> impl Strategy<Value = u64> {
    prop_oneof![
        Just(0u64),
        Just(1u64),
        Just(99u64),
        Just(u64::MAX),
        1_000u64..1_000_000_000u64,
        any::<u64>(),
    ]
}

/// Start timestamp (seconds since Unix epoch)
pub fn arb_timestamp() -> impl Strategy<Value = i64> {
    prop_oneof![
        Just(0i64),
        Just(1_000_000_000i64), // 2001
        1_700_000_000i64..1_800_000_000i64,
    ]
}

/// Time step between two ledger operations
pub fn arb_time_step() -> impl Strategy<Value = i64> {
    prop_oneof![
        Just(0i64),
        Just(1i64),
        Just(1800i64),
        Just(3600i64),
        Just(86_400i64),
        0i64..=3_600i64,
        0i64..=2_592_000i64, // up to 30 days
    ]
}

/// Input for record_work fuzz testing
#[derive(Debug, Clone)]
pub struct RecordWorkInput {
    pub work_type: u8,
    pub effort_weight_bps: u16,
    pub description: String,
    pub pending_tokens: u64,
    pub registered_at: i64,
    pub elapsed: i64,
}

impl Arbitrary for RecordWorkInput {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            arb_work_type_tag(),
            arb_effort_bps(),
            arb_description(),
            0u64..1_000_000_000_000u64,
            arb_timestamp(),
            arb_time_step(),
        )
            .prop_map(
                |(work_type, effort_weight_bps, description, pending_tokens, registered_at, elapsed)| {
                    RecordWorkInput {
                        work_type,
                        effort_weight_bps,
                        description,
                        pending_tokens,
                        registered_at,
                        elapsed,
                    }
                },
            )
            .boxed()
    }
}

/// Input for decay fuzz testing
#[derive(Debug, Clone)]
pub struct DecayInput {
    pub pending_tokens: u64,
    pub decay_rate: u16,
    pub decay_period: i64,
    pub last_decay_check: i64,
    pub elapsed: i64,
}

impl Arbitrary for DecayInput {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            arb_balance(),
            arb_decay_rate(),
            arb_decay_period(),
            arb_timestamp(),
            prop_oneof![arb_time_step(), Just(-86_400i64), 0i64..=315_360_000i64],
        )
            .prop_map(
                |(pending_tokens, decay_rate, decay_period, last_decay_check, elapsed)| DecayInput {
                    pending_tokens,
                    decay_rate,
                    decay_period,
                    last_decay_check,
                    elapsed,
                },
            )
            .boxed()
    }
}

/// One step of a multi-worker ledger sequence
#[derive(Debug, Clone)]
pub enum LedgerOp {
    Record {
        worker: usize,
        work_type: u8,
        effort_weight_bps: u16,
        description: String,
    },
    Decay {
        worker: usize,
    },
    Advance {
        seconds: i64,
    },
}

/// Arbitrary ledger operation over `workers` workers
pub fn arb_ledger_op(workers: usize) -> impl Strategy<Value = LedgerOp> {
    let max = workers.max(1);
    prop_oneof![
        6 => (0..max, arb_work_type_tag(), arb_effort_bps(), arb_description()).prop_map(
            |(worker, work_type, effort_weight_bps, description)| LedgerOp::Record {
                worker,
                work_type,
                effort_weight_bps,
                description,
            }
        ),
        2 => (0..max).prop_map(|worker| LedgerOp::Decay { worker }),
        2 => arb_time_step().prop_map(|seconds| LedgerOp::Advance { seconds }),
    ]
}

/// Input for multi-worker ledger sequence testing
#[derive(Debug, Clone)]
pub struct LedgerSequenceInput {
    pub workers: usize,
    pub start: i64,
    pub ops: Vec<LedgerOp>,
}

impl Arbitrary for LedgerSequenceInput {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (1usize..=4usize, arb_timestamp())
            .prop_flat_map(|(workers, start)| {
                prop::collection::vec(arb_ledger_op(workers), 1..64)
                    .prop_map(move |ops| LedgerSequenceInput { workers, start, ops })
            })
            .boxed()
    }
}
