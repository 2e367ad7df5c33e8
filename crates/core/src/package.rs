//! Packages
//!
//! Admin-side package (plan) composition. A package has a price and a point
//! value, and bundles products; the cost of the bundled products may never
//! exceed the package price.

use std::fmt::{Display, Formatter, Result as FmtResult};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{cart::LineChange, products::Product};

/// Plan (package) identifier, as issued by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub u64);

impl Display for PlanId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// A product reference inside a plan, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanProduct {
    /// Product name
    pub name: String,

    /// Units of the product bundled in the plan
    pub quantity: u32,
}

/// An existing plan as listed by the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Plan identifier
    pub id: PlanId,

    /// Plan name
    pub name: String,

    /// Price in minor units
    pub price: u64,

    /// Point value (PV)
    pub point_value: u64,

    /// Bundled products
    pub products: Vec<PlanProduct>,
}

/// A single composition entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Product name
    pub product_name: String,

    /// Units, at least one while the entry exists
    pub quantity: u32,

    /// Unit price in minor units
    pub unit_price: u64,
}

impl PackageEntry {
    /// Unit price multiplied by quantity.
    pub fn cost(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// A business rule a draft currently breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageIssue {
    /// The package has no name.
    MissingName,

    /// The package price is zero.
    MissingPrice,

    /// No products have been added.
    NoProducts,

    /// The products cost more than the package price.
    OverBudget {
        /// Sum of entry costs
        total: u64,

        /// Package price
        price: u64,
    },
}

impl Display for PackageIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::MissingName => f.write_str("package name is required"),
            Self::MissingPrice => f.write_str("package price is required"),
            Self::NoProducts => f.write_str("add at least one product"),
            Self::OverBudget { .. } => {
                f.write_str("the products cost more than the package price")
            }
        }
    }
}

/// Package issues, in the order they were detected.
pub type PackageIssues = SmallVec<[PackageIssue; 4]>;

/// Errors related to package drafts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackageError {
    /// The draft breaks one or more business rules.
    #[error("package is not valid: {}", join_issues(.0))]
    Invalid(PackageIssues),

    /// A plan references a product missing from the catalog.
    #[error("product `{0}` is not in the catalog")]
    UnknownProduct(String),
}

fn join_issues(issues: &PackageIssues) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The wire projection of a draft: entries reduced to name and quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSubmission {
    /// Package name
    pub name: String,

    /// Price in minor units
    pub price: u64,

    /// Point value (PV)
    pub point_value: u64,

    /// Products by name and quantity
    pub products: Vec<PlanProduct>,
}

/// Package draft being composed in an admin editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDraft {
    /// Package name
    pub name: String,

    /// Point value (PV)
    pub point_value: u64,

    /// Price in minor units; the ceiling for the products' cost
    pub price: u64,

    entries: Vec<PackageEntry>,
}

impl PackageDraft {
    /// Start an empty draft.
    pub fn new(name: impl Into<String>, point_value: u64, price: u64) -> Self {
        Self {
            name: name.into(),
            point_value,
            price,
            entries: Vec::new(),
        }
    }

    /// Pre-populate a draft from an existing plan, taking unit prices from
    /// `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::UnknownProduct`] if the plan names a product
    /// the catalog does not have.
    pub fn from_plan(plan: &Plan, catalog: &[Product]) -> Result<Self, PackageError> {
        let prices: FxHashMap<&str, u64> = catalog
            .iter()
            .map(|product| (product.name.as_str(), product.price))
            .collect();

        let mut draft = Self::new(plan.name.clone(), plan.point_value, plan.price);

        for product in plan.products.iter().filter(|p| p.quantity > 0) {
            let unit_price = prices
                .get(product.name.as_str())
                .copied()
                .ok_or_else(|| PackageError::UnknownProduct(product.name.clone()))?;

            match draft.position(&product.name) {
                Some(index) => {
                    if let Some(entry) = draft.entries.get_mut(index) {
                        entry.quantity = entry.quantity.saturating_add(product.quantity);
                    }
                }
                None => draft.entries.push(PackageEntry {
                    product_name: product.name.clone(),
                    quantity: product.quantity,
                    unit_price,
                }),
            }
        }

        Ok(draft)
    }

    /// Add one of `product`, inserting a new entry at quantity 1 if absent.
    pub fn add_or_increment(&mut self, product: &Product) -> LineChange {
        match self.position(&product.name) {
            Some(index) => self
                .entries
                .get_mut(index)
                .and_then(|entry| {
                    entry.quantity.checked_add(1).map(|quantity| {
                        entry.quantity = quantity;
                        LineChange::Incremented(quantity)
                    })
                })
                .unwrap_or(LineChange::Unchanged),
            None => {
                self.entries.push(PackageEntry {
                    product_name: product.name.clone(),
                    quantity: 1,
                    unit_price: product.price,
                });
                LineChange::Added
            }
        }
    }

    /// Take one away from an entry; an entry at quantity 1 is removed.
    pub fn decrement(&mut self, product_name: &str) -> LineChange {
        let Some(index) = self.position(product_name) else {
            return LineChange::Unchanged;
        };

        match self.entries.get_mut(index) {
            Some(entry) if entry.quantity > 1 => {
                entry.quantity -= 1;
                LineChange::Decremented(entry.quantity)
            }
            _ => {
                self.entries.remove(index);
                LineChange::Removed
            }
        }
    }

    /// Remove an entry regardless of its quantity.
    pub fn remove(&mut self, product_name: &str) -> LineChange {
        match self.position(product_name) {
            Some(index) => {
                self.entries.remove(index);
                LineChange::Removed
            }
            None => LineChange::Unchanged,
        }
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    /// Sum of entry costs.
    pub fn running_total(&self) -> u64 {
        self.entries
            .iter()
            .map(PackageEntry::cost)
            .fold(0, u64::saturating_add)
    }

    /// Whether the products fit within the package price (inclusive).
    pub fn validate_budget(&self) -> bool {
        self.running_total() <= self.price
    }

    /// Every rule the draft currently breaks; empty when submittable.
    pub fn issues(&self) -> PackageIssues {
        let mut issues = PackageIssues::new();

        if self.name.trim().is_empty() {
            issues.push(PackageIssue::MissingName);
        }

        if self.price == 0 {
            issues.push(PackageIssue::MissingPrice);
        }

        if self.entries.is_empty() {
            issues.push(PackageIssue::NoProducts);
        }

        if !self.validate_budget() {
            issues.push(PackageIssue::OverBudget {
                total: self.running_total(),
                price: self.price,
            });
        }

        issues
    }

    /// Check the draft is submittable.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::Invalid`] listing every broken rule.
    pub fn validate(&self) -> Result<(), PackageError> {
        let issues = self.issues();

        if issues.is_empty() {
            Ok(())
        } else {
            Err(PackageError::Invalid(issues))
        }
    }

    /// Project the draft for submission, dropping unit prices.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::Invalid`] if the draft is not submittable.
    pub fn submission(&self) -> Result<PackageSubmission, PackageError> {
        self.validate()?;

        Ok(PackageSubmission {
            name: self.name.trim().to_string(),
            price: self.price,
            point_value: self.point_value,
            products: self
                .entries
                .iter()
                .map(|entry| PlanProduct {
                    name: entry.product_name.clone(),
                    quantity: entry.quantity,
                })
                .collect(),
        })
    }

    fn position(&self, product_name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.product_name.eq_ignore_ascii_case(product_name))
    }
}
