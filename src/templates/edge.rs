//! Microsoft Edge v128 security baseline
//!
//! The exported Edge template carries serialization artifacts (`children`
//! written as `""`, template references written as stringified objects), so
//! this profile opts into the known-defect fixups.

use super::BaselineProfile;

pub const SOURCE_URL: &str = "https://raw.githubusercontent.com/microsoft/Intune-Security-Baselines/main/Edge/Edge_Baseline_v128.json";

const RULES: &[(&str, &str)] = &[
    (
        "Microsoft_Edge",
        r"~policy~microsoft_edge(?!_recommended|~(?:smartscreen|extensions|httpauthentication|contentsettings|privatenetworkrequestsettings|passwordmanager))",
    ),
    ("Microsoft_Edge_Recommended", r"~policy~microsoft_edge_recommended"),
    ("Microsoft_Edge_SmartScreen", r"~policy~microsoft_edge~smartscreen"),
    ("Microsoft_Edge_Extensions", r"~policy~microsoft_edge~extensions"),
    (
        "Microsoft_Edge_HTTP_Authentication",
        r"~policy~microsoft_edge~httpauthentication",
    ),
    (
        "Microsoft_Edge_Content_Settings",
        r"~policy~microsoft_edge~contentsettings",
    ),
    (
        "Microsoft_Edge_Private_Network_Request",
        r"~policy~microsoft_edge~privatenetworkrequestsettings",
    ),
    (
        "Microsoft_Edge_Password_Manager",
        r"~policy~microsoft_edge~passwordmanager",
    ),
];

pub fn profile() -> BaselineProfile {
    BaselineProfile::from_table(
        "edge",
        "Microsoft Edge v128",
        SOURCE_URL,
        "Edge_Baseline_v128.json",
        "Edge_v128_",
        true,
        RULES,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::split::CompiledRules;

    fn categories_for(id: &str) -> Vec<String> {
        let rules = CompiledRules::compile(&profile().rules).unwrap();
        rules.matching_categories(id).unwrap()
    }

    #[test]
    fn test_general_bucket_excludes_subcategories() {
        assert_eq!(
            categories_for(
                "device_vendor_msft_policy_config_microsoft_edge~policy~microsoft_edge~smartscreen_smartscreenenabled"
            ),
            vec!["Microsoft_Edge_SmartScreen"]
        );
        assert_eq!(
            categories_for(
                "device_vendor_msft_policy_config_microsoft_edge~policy~microsoft_edge_basicauthoverhttpenabled"
            ),
            vec!["Microsoft_Edge"]
        );
    }

    #[test]
    fn test_recommended_is_its_own_category() {
        assert_eq!(
            categories_for(
                "device_vendor_msft_policy_config_microsoft_edge~policy~microsoft_edge_recommended~passwordmanager_recommended"
            ),
            vec!["Microsoft_Edge_Recommended"]
        );
    }

    #[test]
    fn test_unrelated_setting_matches_nothing() {
        assert!(categories_for("device_vendor_msft_bitlocker_requiredeviceencryption").is_empty());
    }
}
