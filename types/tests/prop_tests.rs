use proptest::prelude::*;

use nis_types::{Amount, BlockHeight, Hash, Signature, TimeInstant};

proptest! {
    /// Hash bincode serialization roundtrip.
    #[test]
    fn hash_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = Hash::new(bytes);
        let encoded = bincode::serialize(&hash).unwrap();
        let decoded: Hash = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, hash);
    }

    /// Signatures survive bincode despite the hand-written serde impl.
    #[test]
    fn signature_bincode_roundtrip(head in prop::array::uniform32(0u8..), tail in prop::array::uniform32(0u8..)) {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&head);
        bytes[32..].copy_from_slice(&tail);
        let signature = Signature(bytes);
        let encoded = bincode::serialize(&signature).unwrap();
        let decoded: Signature = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, signature);
    }

    /// Amount checked_add agrees with u64 checked_add.
    #[test]
    fn amount_checked_add_matches_u64(a in any::<u64>(), b in any::<u64>()) {
        let sum = Amount::new(a).checked_add(Amount::new(b));
        prop_assert_eq!(sum.map(|s| s.micro()), a.checked_add(b));
    }

    /// blocks_since is never negative and inverts addition.
    #[test]
    fn blocks_since_inverts_offset(base in 1u64..1_000_000, offset in 0u64..1_000_000) {
        let earlier = BlockHeight::new(base);
        let later = BlockHeight::new(base + offset);
        prop_assert_eq!(later.blocks_since(earlier), offset);
        prop_assert_eq!(earlier.blocks_since(later), 0);
    }

    /// TimeInstant ordering follows the raw seconds.
    #[test]
    fn time_instant_ordering(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(TimeInstant::new(a) <= TimeInstant::new(b), a <= b);
    }
}
