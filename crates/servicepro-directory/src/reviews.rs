use std::collections::HashMap;

use servicepro_core::{CurrentUser, Provider, ProviderId, Review, ValidationError};

/// Reviews written during this session. They are shown after a shop's stored
/// reviews and vanish on restart.
#[derive(Debug, Default)]
pub struct ReviewCache {
    local: HashMap<ProviderId, Vec<Review>>,
}

impl ReviewCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRating`] unless `rating` is `1..=5`,
    /// or [`ValidationError::MissingField`] for blank text.
    pub fn append(
        &mut self,
        provider: &ProviderId,
        author: &CurrentUser,
        rating: u8,
        text: &str,
    ) -> Result<(), ValidationError> {
        if !(1..=5).contains(&rating) {
            return Err(ValidationError::InvalidRating(rating));
        }
        if text.trim().is_empty() {
            return Err(ValidationError::MissingField("review"));
        }
        self.local.entry(provider.clone()).or_default().push(Review {
            author: author.username.clone(),
            rating,
            text: text.trim().to_owned(),
        });
        Ok(())
    }

    #[must_use]
    pub fn reviews_for(&self, provider: &Provider) -> Vec<Review> {
        let mut all = provider.reviews.clone();
        if let Some(local) = self.local.get(&provider.id) {
            all.extend(local.iter().cloned());
        }
        all
    }
}
