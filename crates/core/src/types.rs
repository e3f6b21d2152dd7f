//! 도메인 타입 -- 플레어 서비스와 주고받는 공통 타입
//!
//! 모든 크레이트가 공유하는 데이터 구조를 정의합니다.
//! 원격 서비스가 상태를 소유하므로, 여기의 타입은 요청/응답 값일 뿐입니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 커뮤니티 플레어
///
/// `name`은 커뮤니티 안에서 고유하며, 같은 `name`으로 다시 생성하면
/// 새 항목이 아니라 기존 항목이 갱신됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flair {
    /// 내부 이름 (커뮤니티 내 고유 키)
    pub name: String,
    /// 화면에 표시되는 이름
    pub display_name: String,
    /// 아이콘 경로 등 불투명 문자열
    #[serde(default)]
    pub path: Option<String>,
    /// 모더레이터 전용 여부
    #[serde(default)]
    pub mod_only: bool,
    /// 플레어가 속한 커뮤니티 (서비스 응답에만 포함)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_actor_id: Option<String>,
}

impl Flair {
    /// 새 플레어를 생성합니다. `path`와 커뮤니티는 비워 둡니다.
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, mod_only: bool) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            path: None,
            mod_only,
            community_actor_id: None,
        }
    }

    /// 아이콘 경로를 지정합니다.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for Flair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.display_name)?;
        if self.mod_only {
            write!(f, " [mod-only]")?;
        }
        Ok(())
    }
}

/// Bearer 토큰
///
/// 변경 작업(생성/수정/삭제/할당/해제)에 필요한 불투명 자격 증명입니다.
/// 하네스는 토큰을 만들지 않고 전달받기만 합니다.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// 토큰 문자열을 감쌉니다.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// 원본 토큰 문자열
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// 로그에 토큰이 노출되지 않도록 Debug 출력을 가립니다.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// 서비스 생존 확인 결과
///
/// 네트워크 장애도 에러가 아니라 값으로 표현합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Reachability {
    /// 2xx 응답
    Online,
    /// 응답은 했으나 2xx가 아님
    Unhealthy { status: u16 },
    /// 연결 실패, 타임아웃 등
    Unreachable { reason: String },
}

impl Reachability {
    /// 서비스가 정상 응답했는지 여부
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Unhealthy { status } => write!(f, "unhealthy (status {status})"),
            Self::Unreachable { reason } => write!(f, "unreachable ({reason})"),
        }
    }
}

/// 시나리오 실행 변형
///
/// 같은 시나리오를 토큰 없이 또는 Bearer 토큰과 함께 실행합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// 인증 헤더 없이 실행
    #[default]
    Anonymous,
    /// `authorization: Bearer <token>` 헤더와 함께 실행
    Authenticated,
}

impl Variant {
    /// 문자열에서 변형을 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "anonymous" | "anon" => Some(Self::Anonymous),
            "authenticated" | "auth" | "jwt" => Some(Self::Authenticated),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Authenticated => write!(f, "authenticated"),
        }
    }
}
