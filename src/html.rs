// src/html.rs
// Page rendering: one self-contained HTML document per batch.
// Two columns per app: store widget, trailer. DASH trailers play through
// dash.js on hover; plain mp4/webm play natively.

use crate::core::sanitize::escape_html;
use crate::fetch::{ AppRecord, Trailer, TrailerKind };

const DASHJS_SRC: &str = "https://cdnjs.cloudflare.com/ajax/libs/dashjs/4.7.4/dash.all.min.js";

const STYLE: &str = r#"
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body { font-family: 'Segoe UI', Arial, sans-serif; background: #1b2838; color: #c6d4df; padding: 24px; }
    h1 { color: #66c0f4; text-align: center; margin-bottom: 8px; font-size: 1.8rem; letter-spacing: 0.04em; }
    .summary { text-align: center; margin-bottom: 28px; color: #7a8fa8; }
    table { width: auto; margin: 0 auto; border-collapse: collapse; background: #16202d;
            border-radius: 10px; overflow: hidden; box-shadow: 0 6px 24px rgba(0,0,0,0.5); }
    thead { background: #1e3a5f; }
    th { padding: 14px 20px; text-align: left; font-size: 0.85rem; color: #66c0f4;
         text-transform: uppercase; letter-spacing: 0.08em; }
    td { padding: 18px 20px; border-bottom: 1px solid #2a3f5f; vertical-align: middle; }
    tr:last-child td { border-bottom: none; }
    tr:hover { background: #1a2e47; }
    .widget-cell { padding: 12px 20px; }
    .widget-cell iframe { display: block; }
    .video-wrapper video { display: block; border-radius: 6px; background: #000; max-width: 100%; }
    .no-trailer { color: #7a8fa8; font-style: italic; }
    .placeholder { color: #e06c6c; }
    .trailer-link { color: #66c0f4; }
"#;

const SCRIPT: &str = r#"
document.addEventListener('DOMContentLoaded', function () {
    document.querySelectorAll('video[data-mpd]').forEach(function (videoEl) {
        var mpdUrl = videoEl.getAttribute('data-mpd');
        var player = null, ready = false, pendingPlay = false;

        function initPlayer() {
            if (player) return;
            try {
                player = dashjs.MediaPlayer().create();
                player.initialize(videoEl, mpdUrl, false);
                player.on(dashjs.MediaPlayer.events.CAN_PLAY, function () {
                    ready = true;
                    if (pendingPlay) { pendingPlay = false; videoEl.play(); }
                });
            } catch (err) {
                videoEl.parentElement.innerHTML =
                    '<span class="placeholder">Could not start DASH player: ' + err.message + '</span>';
            }
        }

        videoEl.addEventListener('mouseenter', function () {
            if (!player) { pendingPlay = true; initPlayer(); }
            else if (ready) { videoEl.play(); }
            else { pendingPlay = true; }
        });
        videoEl.addEventListener('mouseleave', function () {
            pendingPlay = false;
            videoEl.pause();
        });
    });

    document.querySelectorAll('video.hover-play').forEach(function (videoEl) {
        videoEl.addEventListener('mouseenter', function () { videoEl.play(); });
        videoEl.addEventListener('mouseleave', function () { videoEl.pause(); });
    });
});
"#;

/// Records whose trailer a visitor can actually play in the page.
pub fn playable_count(records: &[AppRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.trailer.as_ref().is_some_and(Trailer::is_playable))
        .count()
}

pub fn render_page(title: &str, records: &[AppRecord]) -> String {
    let title = escape_html(title);
    let mut out = String::with_capacity(4096 + records.len() * 768);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!("<title>Steam Games: {title}</title>\n"));
    out.push_str(&format!("<script src=\"{DASHJS_SRC}\"></script>\n"));
    out.push_str("<style>");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str("<h1>Steam Games</h1>\n");
    out.push_str(&format!(
        "<p class=\"summary\">{title}: {} apps, {} playable trailers</p>\n",
        records.len(),
        playable_count(records)
    ));
    out.push_str("<table>\n<thead><tr><th>Store</th><th>Trailer</th></tr></thead>\n<tbody>\n");

    for r in records {
        out.push_str(&render_row(r));
    }

    out.push_str("</tbody>\n</table>\n<script>");
    out.push_str(SCRIPT);
    out.push_str("</script>\n</body>\n</html>\n");
    out
}

fn render_row(r: &AppRecord) -> String {
    let id = r.app_id;
    let name = escape_html(&r.display_name);

    if !r.status.is_ok() {
        return format!(
            "<tr id=\"app-{id}\">\n<td class=\"widget-cell placeholder\">{name} ({status})</td>\n\
             <td class=\"trailer-cell\"><a class=\"trailer-link\" href=\"{store}\">Store page</a></td>\n</tr>\n",
            status = escape_html(r.status.label()),
            store = escape_html(&r.store_url),
        );
    }

    let widget = format!(
        "<iframe src=\"{}\" title=\"{name}\" frameborder=\"0\" width=\"646\" height=\"190\"></iframe>",
        escape_html(&r.widget_url)
    );

    format!(
        "<tr id=\"app-{id}\">\n<td class=\"widget-cell\">{widget}</td>\n<td class=\"trailer-cell\">{}</td>\n</tr>\n",
        trailer_cell(r)
    )
}

fn trailer_cell(r: &AppRecord) -> String {
    let Some(t) = &r.trailer else {
        return String::from("<em class=\"no-trailer\">No trailer available</em>");
    };
    let url = escape_html(&t.url);
    let poster = r
        .header_image
        .as_deref()
        .map(|p| format!(" poster=\"{}\"", escape_html(p)))
        .unwrap_or_default();
    let id = r.app_id;

    match t.kind {
        TrailerKind::Dash => format!(
            "<div class=\"video-wrapper\"><video id=\"video-{id}\" data-mpd=\"{url}\"{poster} \
             muted controls width=\"960\" preload=\"none\"></video></div>"
        ),
        TrailerKind::Mp4 | TrailerKind::Webm => format!(
            "<div class=\"video-wrapper\"><video id=\"video-{id}\" class=\"hover-play\" src=\"{url}\"{poster} \
             muted controls width=\"960\" preload=\"none\"></video></div>"
        ),
        TrailerKind::Hls => format!("<a class=\"trailer-link\" href=\"{url}\">HLS trailer</a>"),
        TrailerKind::StorePage => format!(
            "<em class=\"no-trailer\">No trailer available</em> <a class=\"trailer-link\" href=\"{url}\">Store page</a>"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchStatus;
    use crate::ids::AppId;

    const BASE: &str = "https://store.steampowered.com";

    fn id(n: u32) -> AppId {
        AppId::new(n).unwrap()
    }

    #[test]
    fn dash_row_has_mpd_and_poster() {
        let r = AppRecord::found(
            BASE,
            id(620),
            Some("Portal 2".into()),
            Some("https://cdn/h.jpg".into()),
            Some(Trailer::new(TrailerKind::Dash, "https://v/x.mpd?a=1&b=2")),
        );
        let html = render_page("rando_bin_1.html", &[r]);
        assert!(html.contains(r#"data-mpd="https://v/x.mpd?a=1&amp;b=2""#));
        assert!(html.contains(r#"poster="https://cdn/h.jpg""#));
        assert!(html.contains("https://store.steampowered.com/widget/620/"));
        assert!(html.contains("1 apps, 1 playable trailers"));
    }

    #[test]
    fn names_are_escaped() {
        let r = AppRecord::found(BASE, id(1), Some("<script>alert(1)</script>".into()), None, None);
        let html = render_page("t", &[r]);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn failed_record_renders_placeholder() {
        let r = AppRecord::failed(BASE, id(9), FetchStatus::RateLimitedExhausted);
        let html = render_page("t", &[r]);
        assert!(html.contains("App 9 (rate limited)"));
        assert!(!html.contains("/widget/9/"));
        assert!(html.contains("0 playable trailers"));
    }

    #[test]
    fn store_page_fallback_is_not_playable() {
        let r = AppRecord::found(BASE, id(2), Some("B".into()), None, None);
        assert_eq!(playable_count(std::slice::from_ref(&r)), 0);
        assert!(render_page("t", &[r]).contains("No trailer available"));
    }

    #[test]
    fn one_row_per_record_in_order() {
        let recs = vec![
            AppRecord::found(BASE, id(30), Some("C".into()), None, None),
            AppRecord::found(BASE, id(10), Some("A".into()), None, None),
        ];
        let html = render_page("t", &recs);
        let c = html.find("app-30").unwrap();
        let a = html.find("app-10").unwrap();
        assert!(c < a);
        assert_eq!(html.matches("<tr id=").count(), 2);
    }
}
