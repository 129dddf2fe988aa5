//! 빌드 컴포넌트 trait: 호스트 빌드 플랫폼의 생명주기 확장 포인트
//!
//! 호스트는 세 단계로 컴포넌트를 구동합니다.
//!
//! 1. `detect`: 컴포넌트가 이 빌드에 참여하는지 판별
//! 2. `compile`: 빌드 시점 작업 수행 (실패 시 빌드 중단)
//! 3. `release`: 런타임 기여 (실행 명령 등) 반환

use std::future::Future;

use crate::error::PomgateError;

/// 빌드 컴포넌트 생명주기 trait
///
/// 새로운 빌드 단계 검사를 추가하려면 이 trait을 구현합니다.
pub trait BuildComponent: Send + Sync {
    /// 컴포넌트가 활성화되었으면 식별자를 반환합니다.
    ///
    /// `None`이면 호스트는 `compile`/`release`를 호출하지 않습니다.
    fn detect(&self) -> Option<String>;

    /// 빌드 시점 작업을 수행합니다.
    ///
    /// 에러를 반환하면 호스트 빌드는 실패합니다.
    fn compile(&mut self) -> impl Future<Output = Result<(), PomgateError>> + Send;

    /// 런타임 실행 명령에 대한 기여를 반환합니다.
    fn release(&self) -> Option<String>;
}
