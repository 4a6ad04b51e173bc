//! Signed transactions and their wire format.
//!
//! ```text
//! Transaction:
//!   num_signatures   compact-u16
//!   signatures       64 bytes * num_signatures
//!   message          (see message.rs)
//! ```

use crate::codec::base64;
use crate::codec::reader::WireReader;
use crate::codec::varint::write_sequence_length;
use crate::error::SolError;
use crate::keypair::{verify_signature, Keypair};
use crate::message::Message;
use crate::signature::{Signature, SIGNATURE_LENGTH};

/// A message together with one signature per required signer.
///
/// `signatures[i]` belongs to `message.account_keys[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub signatures: Vec<Signature>,
    pub message: Message,
}

impl Transaction {
    /// Wrap a message with placeholder signatures, ready for
    /// [`Transaction::partial_sign`].
    pub fn new_unsigned(message: Message) -> Self {
        let n = message.header.num_required_signatures as usize;
        Self {
            signatures: vec![Signature::default(); n],
            message,
        }
    }

    /// The transaction id: the fee payer's signature.
    pub fn signature(&self) -> Option<&Signature> {
        self.signatures.first()
    }

    pub fn is_fully_signed(&self) -> bool {
        self.signatures.len() == self.message.header.num_required_signatures as usize
            && self.signatures.iter().all(|s| !s.is_placeholder())
    }

    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        let message = self.message.serialize()?;
        let mut buf = Vec::with_capacity(3 + SIGNATURE_LENGTH * self.signatures.len() + message.len());

        write_sequence_length(&mut buf, self.signatures.len())?;
        for sig in &self.signatures {
            buf.extend_from_slice(sig.as_bytes());
        }
        buf.extend_from_slice(&message);
        Ok(buf)
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, SolError> {
        let mut reader = WireReader::new(bytes);

        let count = reader.read_len("signature count")?;
        let mut signatures = Vec::with_capacity(count.min(reader.remaining().len() / SIGNATURE_LENGTH));
        for _ in 0..count {
            signatures.push(Signature::new(reader.read_array::<SIGNATURE_LENGTH>("signature")?));
        }

        let message = Message::read(&mut reader)?;

        let trailing = reader.remaining().len();
        if trailing != 0 {
            return Err(SolError::InvalidMessage(format!(
                "{trailing} trailing bytes after transaction ending at byte {}",
                reader.offset()
            )));
        }

        let required = message.header.num_required_signatures as usize;
        if signatures.len() != required {
            return Err(SolError::InvalidMessage(format!(
                "{} signatures for {required} required signers",
                signatures.len()
            )));
        }

        Ok(Self {
            signatures,
            message,
        })
    }

    /// Wire bytes, Base64 encoded, as `sendTransaction` expects them.
    pub fn to_base64(&self) -> Result<String, SolError> {
        Ok(base64::encode(&self.serialize()?))
    }

    pub fn from_base64(text: &str) -> Result<Self, SolError> {
        Self::deserialize(&base64::decode(text)?)
    }

    /// Sign the message with `keypair` and store the signature in the slot
    /// that belongs to its address.
    pub fn partial_sign(&mut self, keypair: &Keypair) -> Result<(), SolError> {
        let address = keypair.address();
        let slot = self
            .message
            .signer_keys()
            .iter()
            .position(|key| *key == address)
            .ok_or(SolError::UnexpectedSigner(address))?;

        let bytes = self.message.serialize()?;
        if self.signatures.len() != self.message.signer_keys().len() {
            self.signatures
                .resize(self.message.signer_keys().len(), Signature::default());
        }
        self.signatures[slot] = keypair.sign(&bytes);
        Ok(())
    }

    /// Check every signature against its signer account.
    pub fn verify(&self) -> Result<(), SolError> {
        let signers = self.message.signer_keys();
        if self.signatures.len() != signers.len() {
            return Err(SolError::InvalidMessage(format!(
                "{} signatures for {} required signers",
                self.signatures.len(),
                signers.len()
            )));
        }

        let bytes = self.message.serialize()?;
        for (address, signature) in signers.iter().zip(&self.signatures) {
            verify_signature(address, &bytes, signature)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::blockhash::Blockhash;
    use crate::instruction::{AccountMeta, Instruction};
    use crate::message::MessageBuilder;

    fn kp(b: u8) -> Keypair {
        Keypair::from_seed(&[b; 32])
    }

    fn message_for(payer: &Keypair, other: &Keypair) -> Message {
        let ix = Instruction::new(
            Address::default(),
            vec![
                AccountMeta::new(payer.address(), true),
                AccountMeta::new(other.address(), true),
                AccountMeta::new(Address::new([9; 32]), false),
            ],
            vec![1, 2, 3],
        );
        let mut builder = MessageBuilder::new();
        builder
            .add_instruction(ix)
            .set_recent_blockhash(Blockhash::new([7; 32]));
        builder.compile(&payer.address()).unwrap()
    }

    #[test]
    fn unsigned_has_placeholders() {
        let tx = Transaction::new_unsigned(message_for(&kp(1), &kp(2)));
        assert_eq!(tx.signatures.len(), 2);
        assert!(tx.signatures.iter().all(Signature::is_placeholder));
        assert!(!tx.is_fully_signed());
        assert!(tx.verify().is_err());
    }

    #[test]
    fn partial_sign_fills_matching_slots() {
        let (a, b) = (kp(1), kp(2));
        let mut tx = Transaction::new_unsigned(message_for(&a, &b));

        tx.partial_sign(&b).unwrap();
        let b_slot = tx.message.signer_keys().iter().position(|k| *k == b.address()).unwrap();
        assert!(!tx.signatures[b_slot].is_placeholder());
        assert!(tx.signatures[0].is_placeholder());

        tx.partial_sign(&a).unwrap();
        assert!(tx.is_fully_signed());
        tx.verify().unwrap();
        assert_eq!(tx.signature(), Some(&tx.signatures[0]));
    }

    #[test]
    fn partial_sign_rejects_non_signer() {
        let mut tx = Transaction::new_unsigned(message_for(&kp(1), &kp(2)));
        let stranger = kp(3);
        assert!(matches!(
            tx.partial_sign(&stranger),
            Err(SolError::UnexpectedSigner(addr)) if addr == stranger.address()
        ));
    }

    #[test]
    fn wire_layout_prefixes_signatures() {
        let (a, b) = (kp(1), kp(2));
        let mut tx = Transaction::new_unsigned(message_for(&a, &b));
        tx.partial_sign(&a).unwrap();
        tx.partial_sign(&b).unwrap();

        let bytes = tx.serialize().unwrap();
        assert_eq!(bytes[0], 2);
        assert_eq!(&bytes[1..65], tx.signatures[0].as_bytes());
        assert_eq!(&bytes[65..129], tx.signatures[1].as_bytes());
        assert_eq!(&bytes[129..], tx.message.serialize().unwrap().as_slice());
    }

    #[test]
    fn deserialize_and_base64_invert_serialize() {
        let (a, b) = (kp(1), kp(2));
        let mut tx = Transaction::new_unsigned(message_for(&a, &b));
        tx.partial_sign(&a).unwrap();
        tx.partial_sign(&b).unwrap();

        let bytes = tx.serialize().unwrap();
        assert_eq!(Transaction::deserialize(&bytes).unwrap(), tx);

        let text = tx.to_base64().unwrap();
        let parsed = Transaction::from_base64(&text).unwrap();
        assert_eq!(parsed, tx);
        parsed.verify().unwrap();
    }

    #[test]
    fn tampered_message_fails_verification() {
        let (a, b) = (kp(1), kp(2));
        let mut tx = Transaction::new_unsigned(message_for(&a, &b));
        tx.partial_sign(&a).unwrap();
        tx.partial_sign(&b).unwrap();

        tx.message.instructions[0].data[0] ^= 0xFF;
        assert!(matches!(
            tx.verify(),
            Err(SolError::SignatureVerification(_))
        ));
    }

    #[test]
    fn deserialize_rejects_signature_count_mismatch() {
        let (a, b) = (kp(1), kp(2));
        let tx = Transaction {
            signatures: vec![Signature::default()],
            message: message_for(&a, &b),
        };
        let bytes = tx.serialize().unwrap();
        assert!(matches!(
            Transaction::deserialize(&bytes),
            Err(SolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn deserialize_truncated_signatures() {
        let bytes = [2u8, 0, 0, 0];
        assert!(matches!(
            Transaction::deserialize(&bytes),
            Err(SolError::TruncatedMessage(_))
        ));
    }

    #[test]
    fn from_base64_rejects_garbage() {
        assert!(matches!(
            Transaction::from_base64("not base64!"),
            Err(SolError::InvalidBase64(_))
        ));
    }
}
