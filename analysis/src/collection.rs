use fundflow_explorer::{
    ExplorerError, FeedBatch, InternalTransfer, MultiTokenTransfer, NativeTransfer, NftTransfer, TokenTransfer,
};
use fundflow_types::Category;
use std::collections::BTreeMap;

/// The joined result of one fan-out: one record list per category plus the
/// failure of every category that could not be fetched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedCollection {
    pub native: Vec<NativeTransfer>,
    pub internal: Vec<InternalTransfer>,
    pub fungible: Vec<TokenTransfer>,
    pub non_fungible: Vec<NftTransfer>,
    pub semi_fungible: Vec<MultiTokenTransfer>,
    pub errors: BTreeMap<Category, ExplorerError>,
}

impl FeedCollection {
    /// Store a batch in the slot of its category, replacing what was there.
    pub fn assign(&mut self, batch: FeedBatch) {
        match batch {
            FeedBatch::Native(records) => self.native = records,
            FeedBatch::Internal(records) => self.internal = records,
            FeedBatch::FungibleToken(records) => self.fungible = records,
            FeedBatch::NonFungibleToken(records) => self.non_fungible = records,
            FeedBatch::SemiFungibleToken(records) => self.semi_fungible = records,
        }
    }

    pub fn record_failure(&mut self, category: Category, error: ExplorerError) {
        self.errors.insert(category, error);
    }

    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn failed_categories(&self) -> Vec<Category> {
        self.errors.keys().copied().collect()
    }

    pub fn len_of(&self, category: Category) -> usize {
        match category {
            Category::Native => self.native.len(),
            Category::Internal => self.internal.len(),
            Category::FungibleToken => self.fungible.len(),
            Category::NonFungibleToken => self.non_fungible.len(),
            Category::SemiFungibleToken => self.semi_fungible.len(),
        }
    }

    pub fn total_records(&self) -> usize {
        Category::ALL.iter().map(|c| self.len_of(*c)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_routes_by_category() {
        let mut collection = FeedCollection::default();
        collection.assign(FeedBatch::FungibleToken(vec![TokenTransfer::default(); 2]));
        collection.assign(FeedBatch::NonFungibleToken(vec![NftTransfer::default()]));

        assert_eq!(collection.len_of(Category::FungibleToken), 2);
        assert_eq!(collection.len_of(Category::NonFungibleToken), 1);
        assert_eq!(collection.len_of(Category::Native), 0);
        assert_eq!(collection.total_records(), 3);
        assert!(collection.is_complete());
    }

    #[test]
    fn failures_are_keyed_by_category() {
        let mut collection = FeedCollection::default();
        collection.record_failure(Category::Internal, ExplorerError::Rejected("NOTOK".into()));
        collection.record_failure(Category::Native, ExplorerError::Unavailable("timeout".into()));

        assert!(!collection.is_complete());
        assert_eq!(
            collection.failed_categories(),
            vec![Category::Native, Category::Internal]
        );
    }
}
