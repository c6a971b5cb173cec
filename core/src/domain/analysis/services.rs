use std::sync::Arc;

use tracing::{instrument, warn};

use crate::domain::analysis::entities::{
    AlternativeProduct, AnalysisResult, InputMode,
};
use crate::domain::analysis::ports::AnalysisGateway;
use crate::domain::analysis::value_objects::{AnalysisForm, BrowseContext};
use crate::domain::capture::entities::{BarcodeScanOutcome, ExtractedProduct};
use crate::domain::common::ProfileFillPolicy;
use crate::domain::common::entities::CoreError;
use crate::domain::history::entities::ScanHistoryItem;
use crate::domain::search::entities::{BarcodeProduct, ProductSuggestion};
use crate::domain::session::entities::{Identity, UserProfile};
use crate::domain::session::ports::AccountGateway;
use crate::domain::skin::entities::SuggestedProduct;

/// The Dashboard controller: owns form state and mode selection, and
/// orchestrates the scan-product request, the conditional alternatives
/// lookup, and best-effort history persistence.
pub struct AnalysisWorkflow<A, AC> {
    analysis: Arc<A>,
    account: Arc<AC>,
    alternatives_threshold: f64,
    fill_policy: ProfileFillPolicy,
    mode: InputMode,
    form: AnalysisForm,
    browse: Option<BrowseContext>,
    result: Option<AnalysisResult>,
    alternatives: Vec<AlternativeProduct>,
    error: Option<String>,
}

impl<A, AC> AnalysisWorkflow<A, AC>
where
    A: AnalysisGateway,
    AC: AccountGateway,
{
    pub fn new(
        analysis: Arc<A>,
        account: Arc<AC>,
        alternatives_threshold: f64,
        fill_policy: ProfileFillPolicy,
    ) -> Self {
        Self {
            analysis,
            account,
            alternatives_threshold,
            fill_policy,
            mode: InputMode::Search,
            form: AnalysisForm::default(),
            browse: None,
            result: None,
            alternatives: Vec::new(),
            error: None,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn form(&self) -> &AnalysisForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AnalysisForm {
        &mut self.form
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn alternatives(&self) -> &[AlternativeProduct] {
        &self.alternatives
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn browse_context(&self) -> Option<&BrowseContext> {
        self.browse.as_ref()
    }

    /// Search-mode selection: product identity only.
    pub fn select_product(&mut self, suggestion: &ProductSuggestion) {
        self.form.adopt_suggestion(suggestion);
    }

    /// OCR result lands in the form and the mode drops to manual so the
    /// user can correct the extracted text before submitting.
    pub fn apply_extracted(&mut self, extracted: &ExtractedProduct) {
        self.form.adopt_extracted(extracted);
        self.mode = InputMode::Manual;
    }

    /// A recognized barcode image resolves to a product record; same
    /// manual-review transition as OCR.
    pub fn apply_barcode_outcome(&mut self, outcome: &BarcodeScanOutcome) -> bool {
        let (Some(barcode), Some(product)) = (&outcome.barcode, &outcome.product) else {
            return false;
        };
        self.apply_barcode_product(product, barcode);
        true
    }

    pub fn apply_barcode_product(&mut self, product: &BarcodeProduct, barcode: &str) {
        self.form.adopt_barcode_product(product, barcode);
        self.mode = InputMode::Manual;
    }

    /// Called whenever the session's cached profile changes. Which fields
    /// it may overwrite is a policy decision; see `ProfileFillPolicy`.
    pub fn apply_profile(&mut self, profile: &UserProfile) {
        self.form.apply_profile(profile, self.fill_policy);
    }

    /// Enters browse mode with externally supplied candidates.
    pub fn enter_browse(&mut self, context: BrowseContext) {
        self.form.category = context.category.clone();
        self.browse = Some(context);
        self.mode = InputMode::Browse;
    }

    /// Submits the current form. On success the result replaces any prior
    /// one; on failure the prior result stays cleared and the message is
    /// kept for rendering.
    #[instrument(skip(self, identity), fields(mode = self.mode.as_str()))]
    pub async fn submit(
        &mut self,
        identity: Option<&Identity>,
    ) -> Result<&AnalysisResult, CoreError> {
        let request = self.form.to_request(self.mode);

        if request.product_name.trim().is_empty()
            && request.ingredients_list.is_none()
            && request.barcode.is_none()
        {
            let message = "Please enter a product name or ingredients list.".to_string();
            self.result = None;
            self.alternatives.clear();
            self.error = Some(message.clone());
            return Err(CoreError::Validation(message));
        }

        self.result = None;
        self.alternatives.clear();
        self.error = None;

        let result = match self.analysis.scan_product(&request).await {
            Ok(result) => result,
            Err(err) => {
                self.error = Some(match &err {
                    CoreError::Backend(msg) | CoreError::Validation(msg) => msg.clone(),
                    _ => "Failed to connect to the server. Please try again.".to_string(),
                });
                return Err(err);
            }
        };

        self.fetch_alternatives(&result).await;
        self.persist_history(identity, &result).await;

        Ok(self.result.insert(result))
    }

    /// Browse-mode shortcut: analyze a candidate directly, bypassing the
    /// form's product fields but keeping the profile fields.
    pub async fn analyze_candidate(
        &mut self,
        candidate: &SuggestedProduct,
        identity: Option<&Identity>,
    ) -> Result<&AnalysisResult, CoreError> {
        self.form.product_name = candidate.product_name.clone();
        self.form.barcode = candidate.id.clone().unwrap_or_default();
        self.mode = InputMode::Browse;
        self.submit(identity).await
    }

    /// Alternatives are only worth showing for risky products with a known
    /// category. Failure here never disturbs the primary result.
    async fn fetch_alternatives(&mut self, result: &AnalysisResult) {
        let category = match &result.category {
            Some(c) if !c.is_empty() => c,
            _ => return,
        };
        if result.product_toxicity_score <= self.alternatives_threshold {
            return;
        }

        match self
            .analysis
            .recommend_alternatives(category, result.product_toxicity_score)
            .await
        {
            Ok(alternatives) => self.alternatives = alternatives,
            Err(err) => warn!("failed to fetch alternatives: {err}"),
        }
    }

    /// Best-effort history append when a session exists.
    async fn persist_history(&self, identity: Option<&Identity>, result: &AnalysisResult) {
        let Some(identity) = identity else { return };

        let name = if result.product_name.is_empty() {
            "Unknown Product".to_string()
        } else {
            result.product_name.clone()
        };
        let item = ScanHistoryItem::new(
            identity.uid.clone(),
            name,
            result.ingredients.clone(),
            result.product_toxicity_score,
        );

        if let Err(err) = self.account.save_history(identity, &item).await {
            warn!("failed to save history: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::entities::{AnalysisRequest, ProductStatus};
    use crate::domain::history::entities::FavoriteStatus;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeAnalysis {
        score: f64,
        category: Option<String>,
        backend_error: Option<String>,
        requests: Mutex<Vec<AnalysisRequest>>,
        alternative_calls: AtomicUsize,
    }

    impl FakeAnalysis {
        fn scoring(score: f64, category: Option<&str>) -> Self {
            Self {
                score,
                category: category.map(str::to_string),
                backend_error: None,
                requests: Mutex::new(Vec::new()),
                alternative_calls: AtomicUsize::new(0),
            }
        }

        fn erroring(message: &str) -> Self {
            Self {
                backend_error: Some(message.to_string()),
                ..Self::scoring(0.0, None)
            }
        }
    }

    impl AnalysisGateway for FakeAnalysis {
        async fn scan_product(
            &self,
            request: &AnalysisRequest,
        ) -> Result<AnalysisResult, CoreError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(message) = &self.backend_error {
                return Err(CoreError::Backend(message.clone()));
            }
            Ok(AnalysisResult {
                product_name: request.product_name.clone(),
                category: self.category.clone(),
                product_toxicity_score: self.score,
                product_status: ProductStatus::Moderate,
                ingredients: vec!["Water".into()],
                toxicity_report: Vec::new(),
                not_suitable_for_skin_type: Vec::new(),
                not_suitable_for_skin_tone: Vec::new(),
                wellness_match: None,
                detailed_score_breakdown: None,
                efficacy_report: None,
                dupes: Vec::new(),
                routine_report: None,
            })
        }

        async fn recommend_alternatives(
            &self,
            _category: &str,
            _current_score: f64,
        ) -> Result<Vec<AlternativeProduct>, CoreError> {
            self.alternative_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![AlternativeProduct {
                product_name: "Gentler Cream".into(),
                brand: Some("Acme".into()),
                toxicity_score: 0.1,
            }])
        }
    }

    struct FakeAccount {
        history_saves: AtomicUsize,
        fail_history: bool,
    }

    impl FakeAccount {
        fn new(fail_history: bool) -> Self {
            Self {
                history_saves: AtomicUsize::new(0),
                fail_history,
            }
        }
    }

    impl AccountGateway for FakeAccount {
        async fn get_profile(&self, _identity: &Identity) -> Result<UserProfile, CoreError> {
            Ok(UserProfile::default())
        }

        async fn save_profile(
            &self,
            _identity: &Identity,
            _profile: &UserProfile,
        ) -> Result<(), CoreError> {
            Ok(())
        }

        async fn save_history(
            &self,
            _identity: &Identity,
            _item: &ScanHistoryItem,
        ) -> Result<(), CoreError> {
            self.history_saves.fetch_add(1, Ordering::SeqCst);
            if self.fail_history {
                return Err(CoreError::Connectivity("offline".into()));
            }
            Ok(())
        }

        async fn list_history(
            &self,
            _identity: &Identity,
        ) -> Result<Vec<ScanHistoryItem>, CoreError> {
            Ok(Vec::new())
        }

        async fn clear_history(&self, _identity: &Identity) -> Result<(), CoreError> {
            Ok(())
        }

        async fn add_favorite(
            &self,
            _identity: &Identity,
            _product_name: &str,
        ) -> Result<FavoriteStatus, CoreError> {
            Ok(FavoriteStatus::Added)
        }
    }

    fn workflow(
        analysis: Arc<FakeAnalysis>,
        account: Arc<FakeAccount>,
    ) -> AnalysisWorkflow<FakeAnalysis, FakeAccount> {
        AnalysisWorkflow::new(analysis, account, 0.3, ProfileFillPolicy::FillEmptyOnly)
    }

    #[tokio::test]
    async fn empty_manual_submission_is_a_validation_error() {
        let analysis = Arc::new(FakeAnalysis::scoring(0.2, None));
        let account = Arc::new(FakeAccount::new(false));
        let mut wf = workflow(analysis.clone(), account);

        wf.set_mode(InputMode::Manual);
        let err = wf.submit(None).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(wf.error().is_some());
        assert!(analysis.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn risky_result_with_category_triggers_alternatives() {
        let analysis = Arc::new(FakeAnalysis::scoring(0.5, Some("Moisturizer")));
        let account = Arc::new(FakeAccount::new(false));
        let mut wf = workflow(analysis.clone(), account);

        wf.set_mode(InputMode::Manual);
        wf.form_mut().ingredients_list = "Water, Parabens".into();
        wf.submit(None).await.unwrap();

        assert_eq!(analysis.alternative_calls.load(Ordering::SeqCst), 1);
        assert_eq!(wf.alternatives().len(), 1);
    }

    #[tokio::test]
    async fn safe_result_skips_the_alternatives_lookup() {
        let analysis = Arc::new(FakeAnalysis::scoring(0.2, Some("Moisturizer")));
        let account = Arc::new(FakeAccount::new(false));
        let mut wf = workflow(analysis.clone(), account);

        wf.set_mode(InputMode::Manual);
        wf.form_mut().ingredients_list = "Water".into();
        wf.submit(None).await.unwrap();

        assert_eq!(analysis.alternative_calls.load(Ordering::SeqCst), 0);
        assert!(wf.alternatives().is_empty());
    }

    #[tokio::test]
    async fn history_failure_never_fails_the_analysis() {
        let analysis = Arc::new(FakeAnalysis::scoring(0.2, None));
        let account = Arc::new(FakeAccount::new(true));
        let mut wf = workflow(analysis, account.clone());

        wf.set_mode(InputMode::Manual);
        wf.form_mut().ingredients_list = "Water".into();
        let identity = Identity::new("u1", "tok");
        assert!(wf.submit(Some(&identity)).await.is_ok());
        assert_eq!(account.history_saves.load(Ordering::SeqCst), 1);
        assert!(wf.result().is_some());
    }

    #[tokio::test]
    async fn backend_error_is_surfaced_verbatim_and_clears_the_result() {
        let analysis = Arc::new(FakeAnalysis::erroring(
            "Ingredients not found. Please try entering them manually.",
        ));
        let account = Arc::new(FakeAccount::new(false));
        let mut wf = workflow(analysis, account);

        wf.set_mode(InputMode::Manual);
        wf.form_mut().ingredients_list = "mystery goo".into();
        assert!(wf.submit(None).await.is_err());
        assert_eq!(
            wf.error(),
            Some("Ingredients not found. Please try entering them manually.")
        );
        assert!(wf.result().is_none());
    }

    #[tokio::test]
    async fn scan_outcome_transitions_to_manual_review() {
        let analysis = Arc::new(FakeAnalysis::scoring(0.2, None));
        let account = Arc::new(FakeAccount::new(false));
        let mut wf = workflow(analysis, account);
        wf.set_mode(InputMode::Scan);

        let outcome = BarcodeScanOutcome {
            found: true,
            barcode: Some("012345".into()),
            product: Some(BarcodeProduct {
                product_name: "Example Cream".into(),
                ingredients_text: "Water, Glycerin".into(),
                ..BarcodeProduct::default()
            }),
        };
        assert!(wf.apply_barcode_outcome(&outcome));

        assert_eq!(wf.mode(), InputMode::Manual);
        assert_eq!(wf.form().product_name, "Example Cream");
        assert_eq!(wf.form().ingredients_list, "Water, Glycerin");
        assert_eq!(wf.form().barcode, "012345");
    }

    #[tokio::test]
    async fn manual_mode_drops_a_stale_barcode_from_the_payload() {
        let analysis = Arc::new(FakeAnalysis::scoring(0.2, None));
        let account = Arc::new(FakeAccount::new(false));
        let mut wf = workflow(analysis.clone(), account);

        wf.select_product(&ProductSuggestion {
            id: "abc".into(),
            product_name: "Old Pick".into(),
            ..ProductSuggestion::default()
        });
        wf.set_mode(InputMode::Manual);
        wf.form_mut().ingredients_list = "Water".into();
        wf.submit(None).await.unwrap();

        let sent = analysis.requests.lock().unwrap();
        assert_eq!(sent[0].ingredients_list.as_deref(), Some("Water"));
        assert_eq!(sent[0].barcode, None);
    }

    #[tokio::test]
    async fn profile_fill_respects_user_edits() {
        let analysis = Arc::new(FakeAnalysis::scoring(0.2, None));
        let account = Arc::new(FakeAccount::new(false));
        let mut wf = workflow(analysis, account);

        wf.form_mut().set_skin_type("Sensitive");
        wf.apply_profile(&UserProfile {
            skin_type: Some("Oily".into()),
            skin_tone: Some("Dark".into()),
            ..UserProfile::default()
        });

        // The edited field survives; the untouched one fills in.
        assert_eq!(wf.form().skin_type, "Sensitive");
        assert_eq!(wf.form().skin_tone, "Dark");
    }

    #[tokio::test]
    async fn overwrite_policy_clobbers_edits() {
        let analysis = Arc::new(FakeAnalysis::scoring(0.2, None));
        let account = Arc::new(FakeAccount::new(false));
        let mut wf = AnalysisWorkflow::new(analysis, account, 0.3, ProfileFillPolicy::Overwrite);

        wf.form_mut().set_skin_type("Sensitive");
        wf.apply_profile(&UserProfile {
            skin_type: Some("Oily".into()),
            ..UserProfile::default()
        });
        assert_eq!(wf.form().skin_type, "Oily");
    }

    #[tokio::test]
    async fn browse_candidate_is_analyzed_directly() {
        let analysis = Arc::new(FakeAnalysis::scoring(0.2, None));
        let account = Arc::new(FakeAccount::new(false));
        let mut wf = workflow(analysis.clone(), account);

        wf.enter_browse(BrowseContext {
            category: "Sunscreen".into(),
            candidates: Vec::new(),
        });
        let candidate = SuggestedProduct {
            product_name: "SPF 50".into(),
            id: Some("xyz".into()),
            ..SuggestedProduct::default()
        };
        wf.analyze_candidate(&candidate, None).await.unwrap();

        let sent = analysis.requests.lock().unwrap();
        assert_eq!(sent[0].product_name, "SPF 50");
        assert_eq!(sent[0].barcode.as_deref(), Some("xyz"));
        assert_eq!(sent[0].ingredients_list, None);
        assert_eq!(sent[0].category, "Sunscreen");
    }
}
