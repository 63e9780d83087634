use ansible_vault::envelope::{Header, Payload, pack, unpack};
use ansible_vault::hexlify::{from_hex, to_hex};
use ansible_vault::padding::{pad, unpad};
use ansible_vault::prelude::*;
use proptest::prelude::*;

proptest! {
    // Every case runs PBKDF2 twice.
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn roundtrip_arbitrary_bytes(data in proptest::collection::vec(any::<u8>(), 0..512), id in "[a-z0-9_-]{0,12}") {
        let vault = Vault::new("pa$$w0rd");

        let envelope = vault.encrypt_bytes_sync(&data, Some(&id)).unwrap();
        let restored = vault.decrypt_bytes_sync(&envelope, Some(&id)).unwrap();
        prop_assert_eq!(Some(data), restored);
    }

    #[test]
    fn roundtrip_arbitrary_text(secret in "\\PC{0,64}") {
        let vault = Vault::new("pa$$w0rd");

        let envelope = vault.encrypt_sync(&secret, None).unwrap();
        prop_assert_eq!(vault.decrypt_sync(&envelope, None).unwrap(), Some(secret));
    }
}

proptest! {
    #[test]
    fn unpad_reverses_pad(data in proptest::collection::vec(any::<u8>(), 0..256), block in 1usize..=255) {
        let mut padded = data.clone();
        padded.extend_from_slice(&pad(data.len(), block).unwrap());

        prop_assert_eq!(padded.len() % block, 0);
        prop_assert_eq!(unpad(&padded, block), data.as_slice());
    }

    #[test]
    fn hex_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(from_hex(to_hex(&data)), data);
    }

    #[test]
    fn pack_unpack_preserves_payload(
        salt in proptest::collection::vec(any::<u8>(), 1..64),
        mac in proptest::collection::vec(any::<u8>(), 1..64),
        ciphertext in proptest::collection::vec(any::<u8>(), 1..256),
    ) {
        let header = Header::new(Some("prod")).unwrap();
        let payload = Payload { salt, mac, ciphertext };

        let text = pack(&header, &payload);
        prop_assert!(text.lines().skip(1).all(|l| l.len() <= 80));
        prop_assert_eq!(unpack(&text, Some("prod")).unwrap(), Some(payload));
    }

    #[test]
    fn decrypt_never_panics_on_garbage(body in "[0-9a-fA-FxX\\n ]{0,400}") {
        let vault = Vault::new("pa$$w0rd");
        let text = format!("$ANSIBLE_VAULT;1.1;AES256\n{body}");

        prop_assert!(vault.decrypt_sync(&text, None).is_err());
    }
}
