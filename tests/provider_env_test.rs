use project_lookup::utils::validation::Validate;
use project_lookup::{LookupError, ProviderConfig};

/// 環境變數是整個 process 共用，所有情境放在同一個測試內依序執行
#[test]
fn test_provider_config_from_os_env() {
    for name in [
        "OS_AUTH_URL",
        "OS_REGION_NAME",
        "OS_USERNAME",
        "OS_PASSWORD",
        "OS_USER_DOMAIN_NAME",
        "OS_DOMAIN_NAME",
        "OS_PROJECT_NAME",
        "OS_TENANT_NAME",
        "OS_AUTH_TOKEN",
        "OS_IDENTITY_ENDPOINT",
        "OS_INSECURE",
        "OS_TIMEOUT",
    ] {
        std::env::remove_var(name);
    }

    // 缺少 OS_AUTH_URL
    assert!(matches!(
        ProviderConfig::from_env(),
        Err(LookupError::MissingConfig { field }) if field == "OS_AUTH_URL"
    ));

    std::env::set_var("OS_AUTH_URL", "https://iam.eu-west-0.example.com/v3");
    std::env::set_var("OS_REGION_NAME", "eu-west-0");
    std::env::set_var("OS_USERNAME", "admin");
    std::env::set_var("OS_PASSWORD", "secret");
    std::env::set_var("OS_DOMAIN_NAME", "acme");
    std::env::set_var("OS_TENANT_NAME", "eu-west-0_demo");
    std::env::set_var("OS_INSECURE", "true");

    let config = ProviderConfig::from_env().unwrap();
    assert_eq!(config.region, "eu-west-0");
    assert_eq!(config.user_domain_name, "acme");
    assert_eq!(config.project_name.as_deref(), Some("eu-west-0_demo"));
    assert!(config.insecure);
    assert_eq!(config.timeout_seconds, 60);
    assert!(config.validate().is_ok());

    std::env::set_var("OS_TIMEOUT", "soon");
    assert!(matches!(
        ProviderConfig::from_env(),
        Err(LookupError::InvalidConfigValue { .. })
    ));
    std::env::set_var("OS_TIMEOUT", "30");
    assert_eq!(ProviderConfig::from_env().unwrap().timeout_seconds, 30);
}
