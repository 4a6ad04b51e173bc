//! Turn a [`MessageBuilder`] and a set of keypairs into a signed
//! [`Transaction`].

use std::collections::HashMap;

use crate::address::Address;
use crate::error::SolError;
use crate::keypair::Keypair;
use crate::message::MessageBuilder;
use crate::transaction::Transaction;

/// Compile `builder` with `signers[0]` as fee payer and sign it.
///
/// Every required signer of the compiled message must be present in
/// `signers`, and every keypair in `signers` must be a required signer. The
/// message is serialized once and all keypairs sign those same bytes.
/// Signatures come back in compiled account order, which need not match the
/// order of `signers`.
pub fn sign(builder: &MessageBuilder, signers: &[&Keypair]) -> Result<Transaction, SolError> {
    let fee_payer = signers.first().ok_or(SolError::NoSigners)?;
    let message = builder.compile(&fee_payer.address())?;

    let by_address: HashMap<Address, &Keypair> =
        signers.iter().map(|kp| (kp.address(), *kp)).collect();

    let required = message.signer_keys();
    if let Some(extra) = signers
        .iter()
        .map(|kp| kp.address())
        .find(|addr| !required.contains(addr))
    {
        return Err(SolError::UnexpectedSigner(extra));
    }

    let bytes = message.serialize()?;
    let signatures = required
        .iter()
        .map(|address| {
            by_address
                .get(address)
                .map(|kp| kp.sign(&bytes))
                .ok_or(SolError::MissingSigner(*address))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        signatures = signatures.len(),
        message_len = bytes.len(),
        "signed transaction"
    );

    Ok(Transaction {
        signatures,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockhash::Blockhash;
    use crate::instruction::{AccountMeta, Instruction};
    use crate::keypair::verify_signature;

    fn kp(b: u8) -> Keypair {
        Keypair::from_seed(&[b; 32])
    }

    fn builder(ixs: Vec<Instruction>) -> MessageBuilder {
        let mut b = MessageBuilder::new();
        for ix in ixs {
            b.add_instruction(ix);
        }
        b.set_recent_blockhash(Blockhash::new([0x11; 32]));
        b
    }

    fn needs_signers(addresses: &[Address]) -> Instruction {
        Instruction::new(
            Address::new([0xF0; 32]),
            addresses.iter().map(|a| AccountMeta::new(*a, true)).collect(),
            vec![0],
        )
    }

    #[test]
    fn single_signer() {
        let payer = kp(1);
        let tx = sign(&builder(vec![needs_signers(&[payer.address()])]), &[&payer]).unwrap();

        assert_eq!(tx.signatures.len(), 1);
        assert_eq!(tx.message.account_keys[0], payer.address());
        let bytes = tx.message.serialize().unwrap();
        verify_signature(&payer.address(), &bytes, &tx.signatures[0]).unwrap();
    }

    #[test]
    fn signature_count_matches_header() {
        let (a, b, c) = (kp(1), kp(2), kp(3));
        let ix = needs_signers(&[a.address(), b.address(), c.address()]);
        let tx = sign(&builder(vec![ix]), &[&a, &c, &b]).unwrap();

        assert_eq!(
            tx.signatures.len(),
            tx.message.header.num_required_signatures as usize
        );
        tx.verify().unwrap();
    }

    #[test]
    fn signatures_follow_account_order_not_argument_order() {
        let (a, b, c) = (kp(1), kp(2), kp(3));
        let ix = needs_signers(&[a.address(), b.address(), c.address()]);
        let tx = sign(&builder(vec![ix]), &[&c, &b, &a]).unwrap();

        let bytes = tx.message.serialize().unwrap();
        assert_eq!(tx.message.account_keys[0], c.address());
        for (i, key) in tx.message.signer_keys().iter().enumerate() {
            let expected = [&a, &b, &c]
                .into_iter()
                .find(|k| k.address() == *key)
                .unwrap()
                .sign(&bytes);
            assert_eq!(tx.signatures[i], expected);
        }
    }

    #[test]
    fn all_signers_sign_identical_bytes() {
        let (a, b) = (kp(1), kp(2));
        let tx = sign(
            &builder(vec![needs_signers(&[a.address(), b.address()])]),
            &[&a, &b],
        )
        .unwrap();
        let bytes = tx.message.serialize().unwrap();
        for (key, sig) in tx.message.signer_keys().iter().zip(&tx.signatures) {
            verify_signature(key, &bytes, sig).unwrap();
        }
    }

    #[test]
    fn missing_signer_fails() {
        let (a, b) = (kp(1), kp(2));
        let ix = needs_signers(&[a.address(), b.address()]);
        let err = sign(&builder(vec![ix]), &[&a]).unwrap_err();
        assert!(matches!(err, SolError::MissingSigner(addr) if addr == b.address()));
    }

    #[test]
    fn unexpected_signer_fails() {
        let (a, stranger) = (kp(1), kp(9));
        let ix = needs_signers(&[a.address()]);
        let err = sign(&builder(vec![ix]), &[&a, &stranger]).unwrap_err();
        assert!(matches!(err, SolError::UnexpectedSigner(addr) if addr == stranger.address()));
    }

    #[test]
    fn no_signers_fails() {
        let ix = needs_signers(&[kp(1).address()]);
        assert!(matches!(
            sign(&builder(vec![ix]), &[]),
            Err(SolError::NoSigners)
        ));
    }

    #[test]
    fn builder_state_errors_propagate() {
        let payer = kp(1);
        let mut no_hash = MessageBuilder::new();
        no_hash.add_instruction(needs_signers(&[payer.address()]));
        assert!(matches!(
            sign(&no_hash, &[&payer]),
            Err(SolError::MissingBlockhash)
        ));

        assert!(matches!(
            sign(&builder(vec![]), &[&payer]),
            Err(SolError::NoInstructions)
        ));
    }

    #[test]
    fn signing_is_deterministic() {
        let payer = kp(4);
        let b = builder(vec![needs_signers(&[payer.address()])]);
        let t1 = sign(&b, &[&payer]).unwrap();
        let t2 = sign(&b, &[&payer]).unwrap();
        assert_eq!(t1.serialize().unwrap(), t2.serialize().unwrap());
    }
}
