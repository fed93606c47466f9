use super::output::{print_json, OutputFormat};
use super::ui::{
    format_status, print_header, print_hint, print_kv, print_kv_colored, print_section,
    print_warning, KvColor,
};
use crate::client::HttpSource;
use chrono::Local;
use metricdash_core::{
    poll_once, ConnectionState, DashboardState, DashboardView, MetricsReading, PollOutcome, View,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// JSON 输出：原始读数加上与看板一致的视图。
#[derive(Debug, Serialize)]
struct SnapshotJson<'a> {
    connection: ConnectionState,
    current: MetricsReading,
    #[serde(flatten)]
    view: &'a DashboardView,
}

/// 单次轮询并打印当前指标；后端不可达时与看板一样退回演示数据。
pub async fn snapshot(source: &HttpSource, output: OutputFormat) -> anyhow::Result<()> {
    let result = poll_once(source).await;
    let mut state = DashboardState::new(1);
    state.apply(
        PollOutcome { seq: 0, result },
        Local::now(),
        &mut StdRng::from_entropy(),
    );

    let view = match state.view(source.endpoint()) {
        View::Dashboard(view) => view,
        View::Loading(_) => anyhow::bail!("no poll outcome recorded"),
    };

    match output {
        OutputFormat::Json => print_json(&SnapshotJson {
            connection: state.connection(),
            current: state.current(),
            view: &view,
        })?,
        OutputFormat::Table => print_table(&state, &view),
    }
    Ok(())
}

fn print_table(state: &DashboardState, view: &DashboardView) {
    print_header("📊 SYSTEM METRICS");

    if let Some(banner) = &view.banner {
        print_section(&format!("⚠️ {}", banner.title));
        print_warning(&banner.message);
        print_warning(&banner.note);
    }

    print_section("Current Metrics");
    print_kv_colored("CPU Usage", &view.cards.cpu, KvColor::White);
    print_kv_colored("Memory Usage", &view.cards.memory, KvColor::White);
    if let Some(total) = &view.cards.total_memory {
        print_kv("Memory Total", total);
    }

    print_section("System Info");
    print_kv("Status", &format_status(state.connection()));
    print_kv_colored(
        "Data Points",
        &view.diagnostics.data_points.to_string(),
        KvColor::Cyan,
    );
    print_kv("Last Update", &view.diagnostics.last_update);
    print_kv_colored("Backend", &view.diagnostics.endpoint, KvColor::Cyan);
    println!();
    print_hint("Use 'metricdash raw' to view the raw metrics");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn json_carries_connection_and_reading() {
        let mut state = DashboardState::new(1);
        state.record_success(
            MetricsReading {
                cpu: Some(12.5),
                memory: None,
                total_memory: Some(8.0),
            },
            Local.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        );
        let View::Dashboard(view) = state.view("http://localhost:8080/metrics") else {
            panic!("expected dashboard view");
        };

        let json = serde_json::to_value(SnapshotJson {
            connection: state.connection(),
            current: state.current(),
            view: &view,
        })
        .unwrap();

        assert_eq!(json["connection"], "live");
        assert_eq!(
            json["current"],
            serde_json::json!({ "cpu": 12.5, "totalMemory": 8.0 })
        );
        assert_eq!(json["diagnostics"]["connection"], "live");
        assert_eq!(json["diagnostics"]["status"], "Connected");
        assert_eq!(json["cards"]["memory"], "N/A");
    }
}
