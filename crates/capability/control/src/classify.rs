//! 库存阈值分级与过滤。

use domain::Color;

/// 库存等级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockLevel {
    Critical,
    Attention,
    Ok,
}

impl StockLevel {
    pub fn color(&self) -> Color {
        match self {
            StockLevel::Critical => Color::CRITICAL,
            StockLevel::Attention => Color::ATTENTION,
            StockLevel::Ok => Color::OK,
        }
    }
}

/// 按数量与阈值分级：`q <= min` 告急，`q <= reorder` 关注，其余充足。
///
/// 阈值配置颠倒（min > reorder）时不做校正，先命中的规则生效。
pub fn classify(quantity: i64, min_stock: i64, reorder_point: i64) -> StockLevel {
    if quantity <= min_stock {
        StockLevel::Critical
    } else if quantity <= reorder_point {
        StockLevel::Attention
    } else {
        StockLevel::Ok
    }
}

/// 看板过滤条件，在分级之后应用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Critical,
    Attention,
}

impl StatusFilter {
    /// 解析过滤条件；空串或无法识别的值视为 `All`。
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => StatusFilter::Critical,
            "attention" => StatusFilter::Attention,
            _ => StatusFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Critical => "critical",
            StatusFilter::Attention => "attention",
        }
    }

    /// `Attention` 同时保留告急项。
    pub fn includes(&self, level: StockLevel) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Critical => level == StockLevel::Critical,
            StatusFilter::Attention => {
                matches!(level, StockLevel::Critical | StockLevel::Attention)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(classify(5, 5, 10), StockLevel::Critical);
        assert_eq!(classify(6, 5, 10), StockLevel::Attention);
        assert_eq!(classify(10, 5, 10), StockLevel::Attention);
        assert_eq!(classify(11, 5, 10), StockLevel::Ok);
        assert_eq!(classify(0, 0, 0), StockLevel::Critical);
    }

    #[test]
    fn inverted_thresholds_fall_through_in_order() {
        assert_eq!(classify(7, 8, 3), StockLevel::Critical);
        assert_eq!(classify(9, 8, 3), StockLevel::Ok);
    }

    #[test]
    fn filter_inclusion() {
        for level in [StockLevel::Critical, StockLevel::Attention, StockLevel::Ok] {
            assert!(StatusFilter::All.includes(level));
        }
        assert!(StatusFilter::Critical.includes(StockLevel::Critical));
        assert!(!StatusFilter::Critical.includes(StockLevel::Attention));
        assert!(StatusFilter::Attention.includes(StockLevel::Critical));
        assert!(StatusFilter::Attention.includes(StockLevel::Attention));
        assert!(!StatusFilter::Attention.includes(StockLevel::Ok));
    }

    #[test]
    fn unknown_filter_means_all() {
        assert_eq!(StatusFilter::parse(""), StatusFilter::All);
        assert_eq!(StatusFilter::parse("ok"), StatusFilter::All);
        assert_eq!(StatusFilter::parse(" Critical "), StatusFilter::Critical);
        assert_eq!(StatusFilter::parse("attention"), StatusFilter::Attention);
    }

    #[test]
    fn level_colors() {
        assert_eq!(StockLevel::Critical.color().to_hex(), "FF0000");
        assert_eq!(StockLevel::Attention.color().to_hex(), "FFFF00");
        assert_eq!(StockLevel::Ok.color().to_hex(), "00FF00");
    }
}
