//! Microsoft 365 Apps for enterprise security baseline
//!
//! Settings Catalog ids for Office ADMX policies look like
//! `user_vendor_msft_policy_config_word16v2~policy~l_microsoftofficeword~...`.
//! The shared Office policies are split into user and machine scope; the
//! user-scope rule uses a negative lookahead so machine ids stay out of it.

use super::BaselineProfile;

pub const SOURCE_URL: &str = "https://raw.githubusercontent.com/microsoft/Intune-Security-Baselines/main/M365Apps/M365_Security_Baseline_Template.json";

const RULES: &[(&str, &str)] = &[
    ("Microsoft_Access_2016", r"policy_config_access16v2~"),
    ("Microsoft_Excel_2016", r"policy_config_excel16v2~"),
    (
        "Microsoft_Office_2016",
        r"policy_config_office16v2~policy~l_microsoftoffice(?!machine)",
    ),
    (
        "Microsoft_Office_2016_Machine",
        r"policy_config_office16v2~policy~l_microsoftofficemachine",
    ),
    ("Microsoft_Outlook_2016", r"policy_config_outlk16v2~"),
    ("Microsoft_PowerPoint_2016", r"policy_config_ppt16v2~"),
    ("Microsoft_Project_2016", r"policy_config_proj16v2~"),
    ("Microsoft_Publisher_2016", r"policy_config_pub16v2~"),
    ("Microsoft_Visio_2016", r"policy_config_visio16v2~"),
    ("Microsoft_Word_2016", r"policy_config_word16v2~"),
];

pub fn profile() -> BaselineProfile {
    BaselineProfile::from_table(
        "m365",
        "Microsoft 365 Apps for enterprise",
        SOURCE_URL,
        "M365_Security_Baseline_Template.json",
        "M365_",
        false,
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
    fn test_word_setting_lands_in_word_only() {
        assert_eq!(
            categories_for(
                "user_vendor_msft_policy_config_word16v2~policy~l_microsoftofficeword~l_wordoptions~l_vbawarningspolicy"
            ),
            vec!["Microsoft_Word_2016"]
        );
    }

    #[test]
    fn test_office_user_and_machine_scope_are_separated() {
        assert_eq!(
            categories_for(
                "user_vendor_msft_policy_config_office16v2~policy~l_microsoftoffice2016~l_securitysettings~l_vbaoff"
            ),
            vec!["Microsoft_Office_2016"]
        );
        assert_eq!(
            categories_for(
                "device_vendor_msft_policy_config_office16v2~policy~l_microsoftofficemachine~l_securitysettingsmachine~l_macroruntimescanscope"
            ),
            vec!["Microsoft_Office_2016_Machine"]
        );
    }

    #[test]
    fn test_matching_ignores_case() {
        assert_eq!(
            categories_for("USER_VENDOR_MSFT_POLICY_CONFIG_EXCEL16V2~POLICY~L_MICROSOFTOFFICEEXCEL"),
            vec!["Microsoft_Excel_2016"]
        );
    }
}
