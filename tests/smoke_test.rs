use std::sync::Arc;
use std::time::Duration;

use scan_feed::{
    cli::ui::{TableRenderer, UiStyle},
    dashboard::{blocks_table, stats_table},
    init, LedgerFeed, SystemClock,
};

#[test]
fn feed_dashboard_smoke() {
    init();

    let mut feed = LedgerFeed::seeded(2024, Arc::new(SystemClock));
    let fired = feed.advance_by(Duration::from_secs(60));
    assert_eq!(fired, 20 + 12 + 4);

    let snapshot = feed.snapshot();
    assert_eq!(snapshot.recent_blocks.len(), 7);
    assert_eq!(snapshot.recent_transactions.len(), 8);
    assert!(snapshot.summary.respects_floors());

    let style = UiStyle::ascii();
    let overview = TableRenderer::render_lines(&stats_table(&snapshot), &style);
    assert!(overview[0].starts_with("Network overview (live, revision 36)"));
    assert_eq!(overview.len(), 4 + 8);

    let blocks = TableRenderer::render_lines(
        &blocks_table(&snapshot.recent_blocks, feed.simulated_now()),
        &style,
    );
    assert!(blocks.iter().any(|line| line.contains("just now")));
}
