use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid seeding rate unit: {0} (expected seeds/acre, lbs/acre or bu/acre)")]
    InvalidUnit(String),

    #[error("Malformed cost for product '{product}': {value:?}")]
    MalformedCost { product: String, value: String },

    #[error("Invalid market price: {0} (must be a positive, finite number)")]
    InvalidMarketPrice(f64),

    #[error("Product '{product}' has {populated} application-rate fields populated, expected exactly one")]
    AmbiguousProductShape { product: String, populated: usize },

    #[error("Invalid catalog entry: {0}")]
    InvalidCatalog(String),

    #[error("Product not found: {name}{}", suggestion_hint(.suggestion))]
    ProductNotFound {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Seed type not found: {0}")]
    SeedTypeNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CalcError {
    /// True when the error points at bad product data rather than bad user input.
    pub fn is_catalog_defect(&self) -> bool {
        matches!(
            self,
            CalcError::MalformedCost { .. }
                | CalcError::AmbiguousProductShape { .. }
                | CalcError::InvalidCatalog(_)
        )
    }

    /// True when re-entering the inputs can fix the error.
    pub fn is_input_mistake(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput(_)
                | CalcError::InvalidUnit(_)
                | CalcError::InvalidMarketPrice(_)
                | CalcError::ProductNotFound { .. }
                | CalcError::SeedTypeNotFound(_)
        )
    }
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let input = CalcError::InvalidInput("acres".to_string());
        assert!(input.is_input_mistake());
        assert!(!input.is_catalog_defect());

        let data = CalcError::InvalidCatalog("size".to_string());
        assert!(data.is_catalog_defect());
        assert!(!data.is_input_mistake());

        let io = CalcError::Io(std::io::Error::other("closed"));
        assert!(!io.is_input_mistake());
        assert!(!io.is_catalog_defect());
    }

    #[test]
    fn test_not_found_suggestion() {
        let err = CalcError::ProductNotFound {
            name: "Leaf Gaurd".to_string(),
            suggestion: Some("Leaf Guard".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Product not found: Leaf Gaurd (did you mean 'Leaf Guard'?)"
        );
        assert!(err.is_input_mistake());
    }
}
