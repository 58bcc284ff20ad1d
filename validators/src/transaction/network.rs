use nis_transactions::Transaction;
use nis_types::NetworkId;

use crate::context::ValidationContext;
use crate::result::ValidationResult;
use crate::traits::SingleTransactionValidator;

/// Every address a transaction names must belong to the configured network.
#[derive(Clone, Debug)]
pub struct NetworkValidator {
    network: NetworkId,
}

impl NetworkValidator {
    pub fn new(network: NetworkId) -> Self {
        Self { network }
    }
}

impl SingleTransactionValidator for NetworkValidator {
    fn name(&self) -> String {
        "NetworkValidator".into()
    }

    fn validate(&self, tx: &Transaction, _context: &ValidationContext) -> ValidationResult {
        let on_network = tx.common().network == self.network
            && tx.accounts().iter().all(|address| address.network() == Some(self.network));
        if on_network {
            ValidationResult::Success
        } else {
            ValidationResult::FailureWrongNetwork
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{common, nem, transfer};
    use nis_crypto::{derive_address, keypair_from_seed};
    use nis_transactions::TransferTransaction;

    #[test]
    fn matching_network_passes() {
        let validator = NetworkValidator::new(NetworkId::Test);
        assert_eq!(validator.validate(&transfer(1, 2, 1, 1), &ValidationContext::default()), ValidationResult::Success);
    }

    #[test]
    fn foreign_signer_fails() {
        let validator = NetworkValidator::new(NetworkId::Main);
        assert_eq!(
            validator.validate(&transfer(1, 2, 1, 1), &ValidationContext::default()),
            ValidationResult::FailureWrongNetwork
        );
    }

    #[test]
    fn foreign_recipient_fails() {
        let validator = NetworkValidator::new(NetworkId::Test);
        let mainnet = derive_address(NetworkId::Main, &keypair_from_seed(&[2; 32]).public);
        let tx = Transaction::Transfer(TransferTransaction::new(common(1), mainnet, nem(1)));
        assert_eq!(validator.validate(&tx, &ValidationContext::default()), ValidationResult::FailureWrongNetwork);
    }
}
