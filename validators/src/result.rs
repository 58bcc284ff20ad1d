//! Validation outcomes.
//!
//! Outcomes are values, never errors. `Neutral` means "cannot decide yet"
//! (for example a multisig transaction still collecting approvals); it is
//! neither a success nor a failure.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! validation_results {
    ($($variant:ident = $value:literal => $name:literal,)*) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum ValidationResult {
            $($variant,)*
        }

        impl ValidationResult {
            /// Stable numeric code.
            pub fn value(&self) -> i32 {
                match self {
                    $(Self::$variant => $value,)*
                }
            }

            pub fn from_value(value: i32) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)*
                    _ => None,
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

validation_results! {
    Success = 0 => "SUCCESS",
    Neutral = 1 => "NEUTRAL",

    // ── Generic ────────────────────────────────────────────────────────────
    FailureUnknown = 2 => "FAILURE_UNKNOWN",
    FailurePastDeadline = 3 => "FAILURE_PAST_DEADLINE",
    FailureFutureDeadline = 4 => "FAILURE_FUTURE_DEADLINE",
    FailureInsufficientBalance = 5 => "FAILURE_INSUFFICIENT_BALANCE",
    FailureMessageTooLarge = 6 => "FAILURE_MESSAGE_TOO_LARGE",
    FailureHashExists = 7 => "FAILURE_HASH_EXISTS",
    FailureSignatureNotVerifiable = 8 => "FAILURE_SIGNATURE_NOT_VERIFIABLE",
    FailureTimestampTooFarInPast = 9 => "FAILURE_TIMESTAMP_TOO_FAR_IN_PAST",
    FailureTimestampTooFarInFuture = 10 => "FAILURE_TIMESTAMP_TOO_FAR_IN_FUTURE",
    FailureIneligibleBlockSigner = 11 => "FAILURE_INELIGIBLE_BLOCK_SIGNER",
    FailureEntityUnusableOutOfSync = 12 => "FAILURE_ENTITY_UNUSABLE_OUT_OF_SYNC",
    FailureChainScoreInferior = 13 => "FAILURE_CHAIN_SCORE_INFERIOR",
    FailureChainInvalid = 14 => "FAILURE_CHAIN_INVALID",
    FailureTooManyTransactions = 15 => "FAILURE_TOO_MANY_TRANSACTIONS",
    FailureSelfSignedTransaction = 16 => "FAILURE_SELF_SIGNED_TRANSACTION",
    FailureInsufficientFee = 17 => "FAILURE_INSUFFICIENT_FEE",
    FailureNemesisAccountTransactionAfterNemesisBlock = 18 => "FAILURE_NEMESIS_ACCOUNT_TRANSACTION_AFTER_NEMESIS_BLOCK",
    FailureTransactionCacheTooFull = 19 => "FAILURE_TRANSACTION_CACHE_TOO_FULL",
    FailureWrongNetwork = 20 => "FAILURE_WRONG_NETWORK",
    FailureCannotHarvestFromBlockedAccount = 21 => "FAILURE_CANNOT_HARVEST_FROM_BLOCKED_ACCOUNT",
    FailureEntityInvalidVersion = 22 => "FAILURE_ENTITY_INVALID_VERSION",

    // ── Forks ──────────────────────────────────────────────────────────────
    FailureMultisigV2AggregateModificationBeforeFork = 41 => "FAILURE_MULTISIG_V2_AGGREGATE_MODIFICATION_BEFORE_FORK",
    FailureTransactionBeforeSecondFork = 42 => "FAILURE_TRANSACTION_BEFORE_SECOND_FORK",

    // ── Importance transfer ────────────────────────────────────────────────
    FailureDestinationAccountHasPreexistingBalanceTransfer = 62 => "FAILURE_DESTINATION_ACCOUNT_HAS_PREEXISTING_BALANCE_TRANSFER",
    FailureImportanceTransferInProgress = 63 => "FAILURE_IMPORTANCE_TRANSFER_IN_PROGRESS",
    FailureImportanceTransferNeedsToBeDeactivated = 64 => "FAILURE_IMPORTANCE_TRANSFER_NEEDS_TO_BE_DEACTIVATED",
    FailureImportanceTransferIsNotActive = 65 => "FAILURE_IMPORTANCE_TRANSFER_IS_NOT_ACTIVE",
    FailureTransactionNotAllowedForRemote = 66 => "FAILURE_TRANSACTION_NOT_ALLOWED_FOR_REMOTE",

    // ── Multisig ───────────────────────────────────────────────────────────
    FailureMultisigNotACosigner = 71 => "FAILURE_MULTISIG_NOT_A_COSIGNER",
    FailureMultisigMissingCosigners = 72 => "FAILURE_MULTISIG_MISSING_COSIGNERS",
    FailureMultisigNoMatchingMultisig = 73 => "FAILURE_MULTISIG_NO_MATCHING_MULTISIG",
    FailureTransactionNotAllowedForMultisig = 74 => "FAILURE_TRANSACTION_NOT_ALLOWED_FOR_MULTISIG",
    FailureMultisigAlreadyACosigner = 75 => "FAILURE_MULTISIG_ALREADY_A_COSIGNER",
    FailureMultisigMismatchedSignature = 76 => "FAILURE_MULTISIG_MISMATCHED_SIGNATURE",
    FailureMultisigModificationMultipleDeletes = 77 => "FAILURE_MULTISIG_MODIFICATION_MULTIPLE_DELETES",
    FailureMultisigModificationRedundantModifications = 78 => "FAILURE_MULTISIG_MODIFICATION_REDUNDANT_MODIFICATIONS",
    FailureConflictingMultisigModification = 79 => "FAILURE_CONFLICTING_MULTISIG_MODIFICATION",
    FailureTooManyMultisigCosigners = 80 => "FAILURE_TOO_MANY_MULTISIG_COSIGNERS",
    FailureMultisigAccountCannotBeCosigner = 81 => "FAILURE_MULTISIG_ACCOUNT_CANNOT_BE_COSIGNER",
    FailureMultisigMinCosignatoriesOutOfRange = 82 => "FAILURE_MULTISIG_MIN_COSIGNATORIES_OUT_OF_RANGE",

    // ── Chain and block ────────────────────────────────────────────────────
    FailureMaxChainSizeExceeded = 101 => "FAILURE_MAX_CHAIN_SIZE_EXCEEDED",
    FailureBlockUnexpectedHeight = 102 => "FAILURE_BLOCK_UNEXPECTED_HEIGHT",
    FailureBlockUnverifiable = 103 => "FAILURE_BLOCK_UNVERIFIABLE",
    FailureBlockNotHit = 104 => "FAILURE_BLOCK_NOT_HIT",
    FailureTransactionUnverifiable = 105 => "FAILURE_TRANSACTION_UNVERIFIABLE",
    FailureTransactionDuplicateInChain = 106 => "FAILURE_TRANSACTION_DUPLICATE_IN_CHAIN",

    // ── Mosaics ────────────────────────────────────────────────────────────
    FailureMosaicUnknown = 141 => "FAILURE_MOSAIC_UNKNOWN",
    FailureMosaicCreatorConflict = 143 => "FAILURE_MOSAIC_CREATOR_CONFLICT",
    FailureMosaicSupplyImmutable = 144 => "FAILURE_MOSAIC_SUPPLY_IMMUTABLE",
    FailureMosaicMaxSupplyExceeded = 145 => "FAILURE_MOSAIC_MAX_SUPPLY_EXCEEDED",
    FailureMosaicSupplyNegative = 146 => "FAILURE_MOSAIC_SUPPLY_NEGATIVE",
    FailureMosaicNotTransferable = 147 => "FAILURE_MOSAIC_NOT_TRANSFERABLE",
    FailureTooManyMosaicTransfers = 152 => "FAILURE_TOO_MANY_MOSAIC_TRANSFERS",
}

impl ValidationResult {
    pub fn is_success(&self) -> bool {
        *self == Self::Success
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Success | Self::Neutral)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fold results with precedence failure > neutral > success, stopping at the
/// first failure without consuming the rest of the iterator.
pub fn aggregate(results: impl IntoIterator<Item = ValidationResult>) -> ValidationResult {
    let mut neutral = false;
    for result in results {
        if result.is_failure() {
            return result;
        }
        neutral |= result == ValidationResult::Neutral;
    }
    if neutral {
        ValidationResult::Neutral
    } else {
        ValidationResult::Success
    }
}

/// Like [`aggregate`] but consumes every result; the first failure still wins.
pub fn aggregate_no_short_circuit(results: impl IntoIterator<Item = ValidationResult>) -> ValidationResult {
    let mut first_failure = None;
    let mut neutral = false;
    for result in results {
        if result.is_failure() {
            first_failure.get_or_insert(result);
        }
        neutral |= result == ValidationResult::Neutral;
    }
    match first_failure {
        Some(failure) => failure,
        None if neutral => ValidationResult::Neutral,
        None => ValidationResult::Success,
    }
}
