//! Statistics API Handlers

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;

use shared::AppResult;
use shared::models::OrderStatus;

use crate::core::ServerState;
use crate::db::repository::stats;

// ====== Response Types ======

/// Aggregates over one time window
#[derive(Debug, Clone, Serialize)]
pub struct PeriodStats {
    pub orders: i64,
    pub revenue: Decimal,
}

/// Order count for one status
#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: i64,
}

/// GET /api/statistics/overview 响应
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsOverview {
    pub orders_by_status: Vec<StatusCount>,
    pub today: PeriodStats,
    pub all_time: PeriodStats,
}

// ====== Handlers ======

/// GET /api/statistics/overview - 运营总览
///
/// Revenue counts COMPLETED payments only, so refunded money never shows
/// up. Sums are exact decimals end to end.
pub async fn overview(State(state): State<ServerState>) -> AppResult<Json<StatisticsOverview>> {
    let pool = state.pool();

    let by_status = stats::count_orders_by_status(pool).await?;
    let total_orders: i64 = by_status.iter().map(|(_, n)| n).sum();

    let since = today_start_millis();
    let today = PeriodStats {
        orders: stats::count_orders_since(pool, since).await?,
        revenue: stats::completed_revenue(pool, Some(since)).await?,
    };
    let all_time = PeriodStats {
        orders: total_orders,
        revenue: stats::completed_revenue(pool, None).await?,
    };

    Ok(Json(StatisticsOverview {
        orders_by_status: by_status
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect(),
        today,
        all_time,
    }))
}

/// 今天本地时区的零点 (Unix millis)
fn today_start_millis() -> i64 {
    let midnight = chrono::Local::now()
        .date_naive()
        .and_time(chrono::NaiveTime::MIN);
    midnight
        .and_local_timezone(chrono::Local)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_start_is_recent_past_midnight() {
        let start = today_start_millis();
        let now = shared::util::now_millis();
        assert!(start <= now);
        // 零点离现在最多 25 小时 (含夏令时边界)
        assert!(now - start < 25 * 3600 * 1000);
    }
}
