//! Typed node responses that are not transactions.

use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// `/addresses/balance/{address}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub address: String,
    #[serde(default)]
    pub confirmations: u32,
    pub balance: u64,
}

/// `/addresses/balance/details/{address}`.
///
/// `regular` is what the address owns, `available` is what it can spend
/// right now (minus outgoing leases), `effective` is what counts for
/// minting (plus incoming leases).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDetail {
    pub address: String,
    pub regular: u64,
    #[serde(default)]
    pub minting_average: u64,
    pub available: u64,
    pub effective: u64,
    #[serde(default)]
    pub height: u64,
}

/// The minter's stake snapshot embedded in each block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SposConsensus {
    pub mint_time: i64,
    pub mint_balance: u64,
}

/// A block as returned by `/blocks/last` and `/blocks/at/{height}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub version: u8,
    pub timestamp: i64,
    pub reference: String,
    #[serde(rename = "SPOSConsensus", default, skip_serializing_if = "Option::is_none")]
    pub spos_consensus: Option<SposConsensus>,
    #[serde(rename = "TransactionMerkleRoot", default, skip_serializing_if = "Option::is_none")]
    pub transaction_merkle_root: Option<String>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub generator: String,
    pub signature: String,
    #[serde(default)]
    pub fee: u64,
    #[serde(default)]
    pub blocksize: u64,
    pub height: u64,
    #[serde(rename = "transaction count", default)]
    pub transaction_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_detail_decodes_camel_case() {
        let detail: BalanceDetail = serde_json::from_str(
            r#"{"address":"a","regular":10,"mintingAverage":9,"available":8,"effective":7,"height":6}"#,
        )
        .unwrap();
        assert_eq!(detail.minting_average, 9);
        assert_eq!(detail.effective, 7);
    }

    #[test]
    fn block_decodes_mixed_transactions() {
        let block: Block = serde_json::from_str(
            r#"{
                "version": 1,
                "timestamp": 1547722056762000000,
                "reference": "ref",
                "SPOSConsensus": {"mintTime": 1547722056000000000, "mintBalance": 5000},
                "TransactionMerkleRoot": "root",
                "transactions": [
                    {"type":1,"id":"genesis","recipient":"AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F",
                     "amount":1,"slotId":0,"timestamp":0,"signature":"s",
                     "status":"Success","feeCharged":0,"height":1},
                    {"type":5,"fee":0,"feeScale":100,"timestamp":1,
                     "recipient":"AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F","amount":900000000,
                     "currentBlockHeight":100},
                    {"type":9,"fee":30000000,"feeScale":100,"timestamp":2,"contractId":"c"}
                ],
                "generator": "AU6veJsmAdZT5QGQrS4yLRYi1yPw6PRJ33F",
                "signature": "sig",
                "fee": 30000000,
                "blocksize": 500,
                "height": 100,
                "transaction count": 3
            }"#,
        )
        .unwrap();

        assert_eq!(block.height, 100);
        assert_eq!(block.transaction_count, 3);
        assert!(matches!(block.transactions[0], Transaction::Unknown(_)));
        assert_eq!(block.transactions[0].type_tag(), 1);
        assert!(matches!(block.transactions[1], Transaction::Minting(_)));
        assert!(matches!(block.transactions[2], Transaction::Unknown(_)));
        assert_eq!(block.spos_consensus.unwrap().mint_balance, 5000);
    }
}
