//! Column classification into numeric and categorical columns.

use crate::input::{Column, Dataset};
use crate::schema::{is_placeholder_name, ColumnProfile, SemanticType};

/// Tags each meaningful column of a dataset as numeric or categorical.
pub struct ColumnClassifier;

impl ColumnClassifier {
    /// Classify every column in declaration order, skipping blank and
    /// placeholder ("unnamed...") columns. Never fails; an empty dataset
    /// yields an empty list.
    pub fn classify(dataset: &Dataset) -> Vec<ColumnProfile> {
        dataset
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, column)| !is_placeholder_name(&column.name))
            .map(|(position, column)| {
                ColumnProfile::new(&column.name, position, Self::semantic_type(column))
            })
            .collect()
    }

    /// A column is numeric when every non-missing value is a number.
    pub fn semantic_type(column: &Column) -> SemanticType {
        if column.is_numeric() {
            SemanticType::Numeric
        } else {
            SemanticType::Categorical
        }
    }
}
