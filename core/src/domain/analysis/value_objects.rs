use std::collections::HashSet;

use crate::domain::analysis::entities::{AnalysisRequest, InputMode};
use crate::domain::capture::entities::ExtractedProduct;
use crate::domain::common::ProfileFillPolicy;
use crate::domain::search::entities::{BarcodeProduct, ProductSuggestion};
use crate::domain::session::entities::UserProfile;
use crate::domain::skin::entities::SuggestedProduct;

/// Fields the profile auto-fill is allowed to touch. Tracked so a refresh
/// never clobbers something the user edited this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    SkinType,
    SkinTone,
    AgeGroup,
    SkinConcerns,
    Allergies,
}

/// Form state behind the analysis dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisForm {
    pub product_name: String,
    pub skin_type: String,
    pub skin_tone: String,
    pub usage_frequency: String,
    pub amount_applied: String,
    pub ingredients_list: String,
    pub barcode: String,
    pub category: String,
    pub age_group: Option<String>,
    pub skin_concerns: Vec<String>,
    pub allergies: Vec<String>,
    touched: HashSet<ProfileField>,
}

impl Default for AnalysisForm {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            skin_type: "Normal".to_string(),
            skin_tone: "Medium".to_string(),
            usage_frequency: "Daily".to_string(),
            amount_applied: "Normal".to_string(),
            ingredients_list: String::new(),
            barcode: String::new(),
            category: String::new(),
            age_group: None,
            skin_concerns: Vec::new(),
            allergies: Vec::new(),
            touched: HashSet::new(),
        }
    }
}

impl AnalysisForm {
    pub fn set_skin_type(&mut self, value: impl Into<String>) {
        self.skin_type = value.into();
        self.touched.insert(ProfileField::SkinType);
    }

    pub fn set_skin_tone(&mut self, value: impl Into<String>) {
        self.skin_tone = value.into();
        self.touched.insert(ProfileField::SkinTone);
    }

    pub fn set_age_group(&mut self, value: impl Into<String>) {
        self.age_group = Some(value.into());
        self.touched.insert(ProfileField::AgeGroup);
    }

    pub fn set_skin_concerns(&mut self, values: Vec<String>) {
        self.skin_concerns = values;
        self.touched.insert(ProfileField::SkinConcerns);
    }

    pub fn set_allergies(&mut self, values: Vec<String>) {
        self.allergies = values;
        self.touched.insert(ProfileField::Allergies);
    }

    /// Adopts an autocomplete pick: identity only, no ingredients; those
    /// resolve server-side from the identifier at submission time.
    pub fn adopt_suggestion(&mut self, suggestion: &ProductSuggestion) {
        self.product_name = suggestion.product_name.clone();
        self.barcode = suggestion.id.clone();
    }

    /// Merges OCR-extracted fields for manual review.
    pub fn adopt_extracted(&mut self, extracted: &ExtractedProduct) {
        self.ingredients_list = extracted.ingredients_text();
        if !extracted.product_name.is_empty() {
            self.product_name = extracted.product_name.clone();
        }
        self.category = extracted.category.clone();
    }

    /// Merges a barcode lookup result for manual review.
    pub fn adopt_barcode_product(&mut self, product: &BarcodeProduct, barcode: &str) {
        self.product_name = product.product_name.clone();
        self.ingredients_list = product.ingredients_text.clone();
        self.barcode = barcode.to_string();
    }

    /// Merges cached profile defaults. Under `FillEmptyOnly` a field is
    /// written only if the user has not edited it this session; under
    /// `Overwrite` every present profile value wins.
    pub fn apply_profile(&mut self, profile: &UserProfile, policy: ProfileFillPolicy) {
        let fill = |touched: &HashSet<ProfileField>, field: ProfileField| {
            policy == ProfileFillPolicy::Overwrite || !touched.contains(&field)
        };

        if let Some(skin_type) = &profile.skin_type
            && fill(&self.touched, ProfileField::SkinType)
        {
            self.skin_type = skin_type.clone();
        }
        if let Some(skin_tone) = &profile.skin_tone
            && fill(&self.touched, ProfileField::SkinTone)
        {
            self.skin_tone = skin_tone.clone();
        }
        if let Some(age_group) = &profile.age_group
            && fill(&self.touched, ProfileField::AgeGroup)
        {
            self.age_group = Some(age_group.clone());
        }
        if !profile.skin_concerns.is_empty() && fill(&self.touched, ProfileField::SkinConcerns) {
            self.skin_concerns = profile.skin_concerns.clone();
        }
        if !profile.allergies.is_empty() && fill(&self.touched, ProfileField::Allergies) {
            self.allergies = profile.allergies.clone();
        }
    }

    /// Builds the wire request. The mode decides which of the two product
    /// identifiers is authoritative:
    ///
    /// - `Manual`: free-text ingredients only; any stale barcode is dropped.
    /// - `Search` / `Browse`: the selected identifier travels as `barcode`;
    ///   ingredients resolve server-side.
    /// - `Scan`: both are sent (they describe the same package) and the
    ///   backend prefers the barcode.
    pub fn to_request(&self, mode: InputMode) -> AnalysisRequest {
        let ingredients = (!self.ingredients_list.trim().is_empty())
            .then(|| self.ingredients_list.clone());
        let barcode = (!self.barcode.trim().is_empty()).then(|| self.barcode.clone());

        let (ingredients_list, barcode) = match mode {
            InputMode::Manual => (ingredients, None),
            InputMode::Search | InputMode::Browse => (None, barcode),
            InputMode::Scan => (ingredients, barcode),
        };

        AnalysisRequest {
            product_name: self.product_name.clone(),
            skin_type: self.skin_type.clone(),
            skin_tone: self.skin_tone.clone(),
            usage_frequency: self.usage_frequency.clone(),
            amount_applied: self.amount_applied.clone(),
            ingredients_list,
            barcode,
            category: self.category.clone(),
            age_group: self.age_group.clone(),
            skin_concerns: self.skin_concerns.clone(),
            allergies: self.allergies.clone(),
        }
    }
}

/// Candidates injected into browse mode from a skin-analysis
/// recommendation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowseContext {
    pub category: String,
    pub candidates: Vec<SuggestedProduct>,
}
