use std::sync::Arc;

use tracing::{instrument, warn};

use crate::domain::capture::entities::ImagePayload;
use crate::domain::common::entities::CoreError;
use crate::domain::session::entities::{Identity, UserProfile};
use crate::domain::skin::entities::{CategoryGuide, SkinReport};
use crate::domain::skin::ports::SkinGateway;

/// Face-scan flow: analyze a selfie, then build the routine guide from the
/// resulting report. A previously persisted report (from the profile) can
/// seed the guide without a fresh scan.
pub struct SkinAnalysisService<G> {
    gateway: Arc<G>,
    report: Option<SkinReport>,
}

impl<G> SkinAnalysisService<G>
where
    G: SkinGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            report: None,
        }
    }

    pub fn report(&self) -> Option<&SkinReport> {
        self.report.as_ref()
    }

    /// Adopts the profile's last persisted report, if any. Returns whether
    /// a report is now available. Never replaces a report from a scan done
    /// in this session.
    pub fn adopt_profile_report(&mut self, profile: &UserProfile) -> bool {
        if self.report.is_none()
            && let Some(report) = &profile.latest_skin_report
        {
            self.report = Some(report.clone());
        }
        self.report.is_some()
    }

    /// Runs the face analysis. The caller should refresh the cached profile
    /// afterwards, since the backend attaches the report to the account.
    #[instrument(skip_all)]
    pub async fn analyze(
        &mut self,
        image: ImagePayload,
        identity: Option<&Identity>,
    ) -> Result<&SkinReport, CoreError> {
        let report = self.gateway.analyze_face(image, identity).await?;
        Ok(self.report.insert(report))
    }

    /// Builds the routine guide for the current report. A failed
    /// product-suggestion lookup leaves that category's list empty rather
    /// than dropping the whole guide.
    #[instrument(skip_all)]
    pub async fn routine_guide(&self) -> Result<Vec<CategoryGuide>, CoreError> {
        let report = self
            .report
            .as_ref()
            .ok_or_else(|| CoreError::Validation("no skin report available".to_string()))?;

        let recommendations = self.gateway.recommend_categories(report).await?;

        let mut guides = Vec::with_capacity(recommendations.len());
        for recommendation in recommendations {
            let products = match self
                .gateway
                .suggest_products(recommendation.query_term(), report)
                .await
            {
                Ok(products) => products,
                Err(err) => {
                    warn!(
                        category = %recommendation.category,
                        "failed to fetch product suggestions: {err}"
                    );
                    Vec::new()
                }
            };
            guides.push(CategoryGuide {
                recommendation,
                products,
            });
        }
        Ok(guides)
    }

    /// Drops the current report so the user can rescan.
    pub fn reset(&mut self) {
        self.report = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::skin::entities::{CategoryRecommendation, SuggestedProduct};

    struct FakeSkin {
        failing_category: Option<String>,
    }

    impl SkinGateway for FakeSkin {
        async fn analyze_face(
            &self,
            _image: ImagePayload,
            _identity: Option<&Identity>,
        ) -> Result<SkinReport, CoreError> {
            Ok(SkinReport {
                skin_type: "Combination".into(),
                summary: "Mild dehydration.".into(),
                ..SkinReport::default()
            })
        }

        async fn recommend_categories(
            &self,
            _report: &SkinReport,
        ) -> Result<Vec<CategoryRecommendation>, CoreError> {
            Ok(vec![
                CategoryRecommendation {
                    category: "Moisturizer".into(),
                    reason: "Restores the barrier.".into(),
                    ..CategoryRecommendation::default()
                },
                CategoryRecommendation {
                    category: "Sunscreen".into(),
                    reason: "Daily protection.".into(),
                    ..CategoryRecommendation::default()
                },
            ])
        }

        async fn suggest_products(
            &self,
            category: &str,
            _report: &SkinReport,
        ) -> Result<Vec<SuggestedProduct>, CoreError> {
            if self.failing_category.as_deref() == Some(category) {
                return Err(CoreError::Connectivity("timed out".into()));
            }
            Ok(vec![SuggestedProduct {
                product_name: format!("Good {category}"),
                toxicity_score: 10.0,
                ..SuggestedProduct::default()
            }])
        }
    }

    #[tokio::test]
    async fn guide_tolerates_a_failing_category_lookup() {
        let mut svc = SkinAnalysisService::new(Arc::new(FakeSkin {
            failing_category: Some("Sunscreen".into()),
        }));
        svc.analyze(ImagePayload::jpeg(vec![1, 2, 3], "selfie.jpg"), None)
            .await
            .unwrap();

        let guides = svc.routine_guide().await.unwrap();
        assert_eq!(guides.len(), 2);
        assert_eq!(guides[0].products.len(), 1);
        assert!(guides[1].products.is_empty());
    }

    #[tokio::test]
    async fn guide_without_a_report_is_a_validation_error() {
        let svc = SkinAnalysisService::new(Arc::new(FakeSkin {
            failing_category: None,
        }));
        assert!(matches!(
            svc.routine_guide().await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn profile_report_seeds_but_never_replaces_a_fresh_scan() {
        let mut svc = SkinAnalysisService::new(Arc::new(FakeSkin {
            failing_category: None,
        }));
        svc.analyze(ImagePayload::jpeg(vec![1], "selfie.jpg"), None)
            .await
            .unwrap();

        let profile = UserProfile {
            latest_skin_report: Some(SkinReport {
                skin_type: "Dry".into(),
                ..SkinReport::default()
            }),
            ..UserProfile::default()
        };
        assert!(svc.adopt_profile_report(&profile));
        assert_eq!(svc.report().unwrap().skin_type, "Combination");
    }
}
