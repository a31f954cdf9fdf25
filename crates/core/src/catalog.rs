//! Service catalog: read-only reference data mapping each delegable service
//! to its platform and default authorization window.

use serde::Serialize;

use crate::delegation::{DurationType, Platform};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOption {
    pub id: String,
    pub platform: Platform,
    pub name_ar: String,
    pub name_en: String,
    pub is_digital: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_duration: Option<DurationType>,
}

impl ServiceOption {
    fn new(
        id: &str,
        platform: Platform,
        name_ar: &str,
        name_en: &str,
        is_digital: bool,
        default_duration: Option<DurationType>,
    ) -> Self {
        Self {
            id: id.to_string(),
            platform,
            name_ar: name_ar.to_string(),
            name_en: name_en.to_string(),
            is_digital,
            default_duration,
        }
    }
}

/// Ordered list of services. Lookups and intent matching walk it in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCatalog {
    services: Vec<ServiceOption>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<ServiceOption>) -> Self {
        Self { services }
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> Self {
        use DurationType::*;
        use Platform::*;

        Self::new(vec![
            ServiceOption::new("drv-license", Absher, "استلام رخصة القيادة", "Driving license pickup", true, Some(Hours24)),
            ServiceOption::new("vehicle-auth", Absher, "تفويض مركبة", "Vehicle delegation", true, Some(Days7)),
            ServiceOption::new("passport-delivery", Absher, "استلام جواز السفر", "Passport delivery", false, None),
            ServiceOption::new("court-rep", Najiz, "تمثيل في قضية", "Court representation", false, Some(Custom)),
            ServiceOption::new("notary", Najiz, "توثيق وكالة", "Notary authorization", false, None),
            ServiceOption::new("document-drop", Najiz, "تسليم مستندات", "Submit documents", true, Some(Hours24)),
            ServiceOption::new("absherbiz-auth", AbsherBusiness, "تفويض أعمال", "Business delegation", true, Some(Days7)),
            ServiceOption::new("absherbiz-branches", AbsherBusiness, "إدارة الفروع", "Branch management", true, None),
        ])
    }

    pub fn services(&self) -> &[ServiceOption] {
        &self.services
    }

    pub fn find(&self, service_id: &str) -> Option<&ServiceOption> {
        self.services.iter().find(|s| s.id == service_id)
    }

    /// First service listed for `platform`, used as the wizard's preselection.
    pub fn first_for(&self, platform: Platform) -> Option<&ServiceOption> {
        self.services.iter().find(|s| s.platform == platform)
    }

    /// Services on `platform` whose Arabic or English name contains `term`,
    /// case-insensitively. An empty term matches everything on the platform.
    pub fn search(&self, platform: Option<Platform>, term: &str) -> Vec<&ServiceOption> {
        let needle = term.trim().to_lowercase();
        self.services
            .iter()
            .filter(|s| platform.map_or(true, |p| s.platform == p))
            .filter(|s| {
                let haystack = format!("{} {}", s.name_ar, s.name_en).to_lowercase();
                haystack.contains(&needle)
            })
            .collect()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_are_unique() {
        let catalog = ServiceCatalog::builtin();
        let mut ids: Vec<_> = catalog.services().iter().map(|s| s.id.as_str()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn find_known_service() {
        let catalog = ServiceCatalog::builtin();
        let svc = catalog.find("court-rep").unwrap();
        assert_eq!(svc.platform, Platform::Najiz);
        assert_eq!(svc.default_duration, Some(DurationType::Custom));
        assert!(catalog.find("id-renew").is_none());
    }

    #[test]
    fn first_for_platform_follows_catalog_order() {
        let catalog = ServiceCatalog::builtin();
        assert_eq!(catalog.first_for(Platform::Najiz).unwrap().id, "court-rep");
        assert_eq!(
            catalog.first_for(Platform::AbsherBusiness).unwrap().id,
            "absherbiz-auth"
        );
    }

    #[test]
    fn search_matches_either_language() {
        let catalog = ServiceCatalog::builtin();
        let hits: Vec<_> = catalog
            .search(Some(Platform::Absher), "PASSPORT")
            .into_iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(hits, vec!["passport-delivery"]);

        let hits = catalog.search(Some(Platform::Najiz), "توثيق");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "notary");
    }

    #[test]
    fn empty_search_lists_platform() {
        let catalog = ServiceCatalog::builtin();
        assert_eq!(catalog.search(Some(Platform::Najiz), "").len(), 3);
        assert_eq!(catalog.search(None, "  ").len(), 8);
    }
}
