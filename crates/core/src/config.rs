//! 설정 관리 -- flaircheck.toml 파싱 및 런타임 설정
//!
//! [`FlairCheckConfig`]는 하네스 실행에 필요한 모든 설정을 담는 최상위 구조체입니다.
//! 서비스 주소는 고정값이며 설정 대상이 아닙니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`FLAIRCHECK_AUTH_TOKEN=...` 형식)
//! 3. 설정 파일 (`flaircheck.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), flaircheck_core::error::FlairCheckError> {
//! use flaircheck_core::config::FlairCheckConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드 (파일이 없으면 기본값)
//! let config = FlairCheckConfig::load_or_default("flaircheck.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = FlairCheckConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, FlairCheckError};
use crate::types::{AuthToken, Variant};

/// flaircheck 통합 설정
///
/// `flaircheck.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlairCheckConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 시나리오 대상 (커뮤니티, 사용자, 변형)
    #[serde(default)]
    pub scenario: ScenarioConfig,
    /// 인증 설정
    #[serde(default)]
    pub auth: AuthConfig,
}

impl FlairCheckConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, FlairCheckError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// [`load`](Self::load)와 같지만, 파일이 없으면 기본값에서 시작합니다.
    ///
    /// 인자 없이 실행해도 하네스가 동작하도록 하기 위한 진입점입니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, FlairCheckError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(FlairCheckError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, FlairCheckError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FlairCheckError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                FlairCheckError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, FlairCheckError> {
        toml::from_str(toml_str).map_err(|e| {
            FlairCheckError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `FLAIRCHECK_{SECTION}_{FIELD}`
    /// 예: `FLAIRCHECK_SCENARIO_USER_ACTOR_ID=http://localhost/u/alice`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "FLAIRCHECK_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "FLAIRCHECK_GENERAL_LOG_FORMAT");

        // Scenario
        override_string(
            &mut self.scenario.community_actor_id,
            "FLAIRCHECK_SCENARIO_COMMUNITY_ACTOR_ID",
        );
        override_string(
            &mut self.scenario.user_actor_id,
            "FLAIRCHECK_SCENARIO_USER_ACTOR_ID",
        );
        override_optional_string(
            &mut self.scenario.instance_domain,
            "FLAIRCHECK_SCENARIO_INSTANCE_DOMAIN",
        );
        override_variants(&mut self.scenario.variants, "FLAIRCHECK_SCENARIO_VARIANTS");
        override_u32(&mut self.scenario.repeat, "FLAIRCHECK_SCENARIO_REPEAT");

        // Auth
        override_string(&mut self.auth.token, "FLAIRCHECK_AUTH_TOKEN");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), FlairCheckError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.scenario.community_actor_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scenario.community_actor_id".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        if self.scenario.user_actor_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scenario.user_actor_id".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        if self.scenario.variants.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scenario.variants".to_owned(),
                reason: "at least one variant must be selected".to_owned(),
            }
            .into());
        }

        if self.scenario.repeat == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scenario.repeat".to_owned(),
                reason: "must be at least 1".to_owned(),
            }
            .into());
        }

        // 인증 변형은 토큰 없이 실행할 수 없음
        if self.scenario.variants.contains(&Variant::Authenticated)
            && self.auth.token.trim().is_empty()
        {
            return Err(ConfigError::InvalidValue {
                field: "auth.token".to_owned(),
                reason: "a bearer token is required for the authenticated variant".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 시나리오 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// 대상 커뮤니티 actor ID
    pub community_actor_id: String,
    /// 대상 사용자 actor ID
    pub user_actor_id: String,
    /// 요청 본문에 실리는 인스턴스 도메인 (선택)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_domain: Option<String>,
    /// 실행할 변형 목록
    pub variants: Vec<Variant>,
    /// 변형별 반복 횟수
    pub repeat: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            community_actor_id: "http://localhost/c/play".to_owned(),
            user_actor_id: "http://localhost/u/Nerd02".to_owned(),
            instance_domain: None,
            variants: vec![Variant::Anonymous],
            repeat: 1,
        }
    }
}

/// 인증 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 미리 발급된 Bearer 토큰 (비어 있으면 없음)
    pub token: String,
}

impl AuthConfig {
    /// 설정된 토큰을 반환합니다. 빈 문자열은 토큰 없음으로 취급합니다.
    pub fn token(&self) -> Option<AuthToken> {
        let trimmed = self.token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(AuthToken::new(trimmed))
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_optional_string(target: &mut Option<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = if val.trim().is_empty() {
            None
        } else {
            Some(val)
        };
    }
}

fn override_u32(target: &mut u32, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u32>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u32 from env var, ignoring"
            ),
        }
    }
}

fn override_variants(target: &mut Vec<Variant>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        let parsed: Option<Vec<Variant>> = val
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(Variant::from_str_loose)
            .collect();
        match parsed {
            Some(variants) => *target = variants,
            None => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse variant list from env var, ignoring"
            ),
        }
    }
}
