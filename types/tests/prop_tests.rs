use proptest::prelude::*;

use tally_types::{AccountAddress, ElectionState, ElectionWindow, Timestamp};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// A window with starts_at >= ends_at never constructs.
    #[test]
    fn window_rejects_non_increasing_pairs(s in 1u64..1_000_000, e in 1u64..1_000_000) {
        let result = ElectionWindow::new(Timestamp::new(s), Timestamp::new(e));
        prop_assert_eq!(result.is_ok(), s < e);
    }

    /// For a fixed window, the derived state never regresses as time advances.
    #[test]
    fn state_monotonic_in_time(
        s in 1u64..500_000,
        len in 1u64..500_000,
        t1 in 0u64..2_000_000,
        dt in 0u64..2_000_000,
    ) {
        let w = ElectionWindow::new(Timestamp::new(s), Timestamp::new(s + len)).unwrap();
        let early = ElectionWindow::state_at(Some(&w), Timestamp::new(t1));
        let late = ElectionWindow::state_at(Some(&w), Timestamp::new(t1 + dt));
        prop_assert!(early <= late);
    }

    /// With no window configured the state is Unconfigured at every instant.
    #[test]
    fn missing_window_always_unconfigured(t in 0u64..u64::MAX) {
        prop_assert_eq!(
            ElectionWindow::state_at(None, Timestamp::new(t)),
            ElectionState::Unconfigured
        );
    }

    /// Address parsing accepts exactly the 0x + 40 hex shape and lowercases it.
    #[test]
    fn address_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let raw = format!("0x{}", hex::encode_upper(bytes));
        let addr = AccountAddress::parse(&raw).unwrap();
        prop_assert_eq!(addr.as_str(), raw.to_lowercase());
    }
}
