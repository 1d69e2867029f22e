//! 터미널 출력 포맷팅 유틸리티
//!
//! 서비스 레지스트리 초기화 과정을 기동 로그와 구분되게 출력합니다.
//! 로거 설정과 무관하게 항상 보여야 하므로 `println!`을 사용합니다.
//!
//! ```text
//! ╔══════════════════════════════════════════════════╗
//! ║         🔄 INITIALIZING SERVICE REGISTRY         ║
//! ╚══════════════════════════════════════════════════╝
//! → Step 1: Creating Service instances
//!    ├─ token_service: ✓ Created
//!    ├─ user_service: ✓ Created
//! ✓ Step 1: Service instances created (4 items)
//! ```

const BOX_WIDTH: usize = 50;

/// 박스 형태로 둘러싸인 제목 문자열을 만듭니다 (3줄)
pub fn format_boxed_title(title: &str) -> String {
    let border = "═".repeat(BOX_WIDTH);
    format!("╔{border}╗\n║{:^width$}║\n╚{border}╝", title, width = BOX_WIDTH - 1)
}

pub fn print_boxed_title(title: &str) {
    println!("{}", format_boxed_title(title));
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 하위 작업 상태를 트리 형태로 출력합니다
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 레지스트리 초기화 요약
///
/// * `instances` - `ServiceLocator::set`으로 직접 등록된 인스턴스 수 (사용자 저장소 등)
/// * `services` - `inventory`로 등록된 싱글톤 서비스 수
pub fn print_final_summary(instances: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Registered instances: {}", instances);
    println!("   🔧 Services: {}", services);
    println!();
}

pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("   ├─ {} Cache: {} entries loaded", cache_type, count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_title_has_three_lines_of_equal_width() {
        let boxed = format_boxed_title("user-api");
        let lines: Vec<&str> = boxed.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("user-api"));
        assert_eq!(lines[0].chars().count(), lines[2].chars().count());
        assert_eq!(lines[0].chars().count(), BOX_WIDTH + 2);
    }
}
