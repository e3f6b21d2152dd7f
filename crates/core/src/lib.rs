//! flaircheck 공통 타입, 에러, 설정
//!
//! 하네스의 모든 크레이트가 공유하는 도메인 타입과 설정 로딩을 제공합니다.

pub mod config;
pub mod error;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, FlairCheckError};

// 설정
pub use config::FlairCheckConfig;

// 도메인 타입
pub use types::{AuthToken, Flair, Reachability, Variant};
