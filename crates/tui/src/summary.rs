use std::collections::BTreeMap;

use api_types::{
    Amount,
    expense::{Category, Expense},
};

/// Aggregates shown on top of the expense list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total: Amount,
    pub count: usize,
    /// Only categories that appear in the list, in [`Category::ALL`] order.
    pub by_category: BTreeMap<Category, Amount>,
}

impl Summary {
    pub fn derive(expenses: &[Expense]) -> Self {
        let mut by_category: BTreeMap<Category, Amount> = BTreeMap::new();
        for expense in expenses {
            *by_category.entry(expense.category).or_default() += expense.amount;
        }

        Self {
            total: expenses.iter().map(|e| e.amount).sum(),
            count: expenses.len(),
            by_category,
        }
    }

    /// Share of the total spent in `category`, in `[0, 1]`.
    pub fn share(&self, category: Category) -> f64 {
        self.by_category
            .get(&category)
            .map_or(0.0, |amount| amount.share_of(self.total))
    }
}
