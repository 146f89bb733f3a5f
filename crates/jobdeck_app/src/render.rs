//! Text rendering of the job list, job details and bookmark list.

use std::collections::HashSet;

use jobdeck_core::{FeedStatus, FeedView, JobId, JobRecord};

pub const LOAD_FAILED: &str =
    "Failed to load jobs. Please check your internet connection and try again.";
pub const RETRY_HINT: &str = "Type `refresh` to retry.";
pub const NO_JOBS: &str = "No jobs available";
pub const NO_BOOKMARKS: &str = "No bookmarked jobs yet";

pub const HELP: &str = "\
Commands:
  more | m          load the next page
  refresh | r       reload from the first page
  jobs | j          show the job list
  saved | s         show bookmarked jobs
  open N | o N      show details of item N
  mark N | b N      bookmark / unbookmark item N
  help | h          this text
  quit | q          leave";

pub fn render_feed(view: &FeedView, bookmarked: &HashSet<JobId>) -> String {
    match view.status() {
        FeedStatus::Loading => return "Loading jobs...".to_string(),
        FeedStatus::Failed => return format!("{LOAD_FAILED}\n{RETRY_HINT}"),
        FeedStatus::Empty => return NO_JOBS.to_string(),
        FeedStatus::Ready => {}
    }

    let mut out = render_cards(&view.jobs, bookmarked);
    let footer = if view.loading {
        "Loading more...".to_string()
    } else if view.error.is_some() {
        format!("{LOAD_FAILED}\nType `more` to retry.")
    } else if view.has_more {
        "Type `more` for the next page.".to_string()
    } else {
        "No more jobs.".to_string()
    };
    out.push('\n');
    out.push_str(&footer);
    out
}

pub fn render_bookmarks(saved: &[JobRecord]) -> String {
    if saved.is_empty() {
        return NO_BOOKMARKS.to_string();
    }
    let all: HashSet<JobId> = saved.iter().map(|job| job.id.clone()).collect();
    render_cards(saved, &all)
}

fn render_cards(jobs: &[JobRecord], bookmarked: &HashSet<JobId>) -> String {
    let mut out = String::new();
    for (index, job) in jobs.iter().enumerate() {
        out.push_str(&render_card(index + 1, job, bookmarked.contains(&job.id)));
        out.push('\n');
    }
    out
}

pub fn render_card(index: usize, job: &JobRecord, bookmarked: bool) -> String {
    let marker = if bookmarked { "[*]" } else { "[ ]" };
    let title = job.title().unwrap_or_else(|| "(untitled)".to_string());
    let mut out = format!("{index:>3}. {marker} {title}");

    let details: Vec<String> = [
        ("Location", job.location()),
        ("Salary", job.salary()),
        ("Phone", job.phone()),
        ("Company", job.company()),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| format!("{label}: {v}")))
    .collect();
    if !details.is_empty() {
        out.push_str("\n         ");
        out.push_str(&details.join("  |  "));
    }
    out
}

pub fn render_detail(job: &JobRecord, bookmarked: bool) -> String {
    let mut out = job.title().unwrap_or_else(|| "(untitled)".to_string());
    if job.is_premium() {
        out.push_str("  [premium]");
    }
    out.push_str(if bookmarked {
        "\nBookmarked"
    } else {
        "\nNot bookmarked"
    });
    out.push('\n');

    let rows = [
        ("Company", job.company()),
        ("Location", job.location()),
        ("Salary", job.salary()),
        ("Job type", job.job_type()),
        ("Experience", job.experience()),
        ("Openings", job.openings()),
        ("Fees", job.fees()),
        ("Phone", job.call_label()),
        ("WhatsApp", job.whatsapp_link()),
        (
            "Call hours",
            job.call_window()
                .map(|(start, end)| format!("{start} - {end}")),
        ),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            out.push_str(&format!("\n{label:<11} {value}"));
        }
    }

    let tags = job.tags();
    if !tags.is_empty() {
        out.push_str(&format!("\n{:<11} {}", "Tags", tags.join(", ")));
    }
    let images = job.image_count();
    if images > 0 {
        out.push_str(&format!("\n{:<11} {}", "Images", images));
    }

    for (label, value) in [
        ("Description", job.description()),
        ("Requirements", job.requirements()),
    ] {
        if let Some(value) = value {
            out.push_str(&format!("\n\n{label}\n{value}"));
        }
    }

    let details = job.additional_details();
    if !details.is_empty() {
        out.push_str("\n\nAdditional Information");
        for (name, value) in details {
            out.push_str(&format!("\n{name}: {value}"));
        }
    }

    let stats = job.stats();
    out.push_str(&format!(
        "\n\n{} views  |  {} shares  |  {} applications",
        stats.views, stats.shares, stats.applications
    ));
    for (label, date) in [("Posted", job.posted_on()), ("Expires", job.expires_on())] {
        if let Some(date) = date {
            out.push_str(&format!("\n{label}: {}", date.format("%Y-%m-%d")));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobdeck_core::FeedError;

    fn view(jobs: Vec<JobRecord>) -> FeedView {
        FeedView {
            jobs,
            cursor: 2,
            has_more: true,
            loading: false,
            refreshing: false,
            error: None,
        }
    }

    #[test]
    fn empty_states() {
        assert_eq!(render_feed(&view(Vec::new()), &HashSet::new()), NO_JOBS);

        let mut failed = view(Vec::new());
        failed.error = Some(FeedError::new(1, "offline"));
        assert!(render_feed(&failed, &HashSet::new()).contains(RETRY_HINT));

        let mut loading = view(Vec::new());
        loading.loading = true;
        assert_eq!(render_feed(&loading, &HashSet::new()), "Loading jobs...");

        assert_eq!(render_bookmarks(&[]), NO_BOOKMARKS);
    }

    #[test]
    fn cards_show_marker_and_present_fields_only() {
        let job = JobRecord::new(4)
            .with_field("title", "Tailor")
            .with_field("salary", "15k");
        let card = render_card(2, &job, true);
        assert_eq!(card, "  2. [*] Tailor\n         Salary: 15k");

        let with_phone = job.with_field("phone", "+91 555");
        assert_eq!(
            render_card(2, &with_phone, false),
            "  2. [ ] Tailor\n         Salary: 15k  |  Phone: +91 555"
        );
    }

    #[test]
    fn footer_reflects_pagination() {
        let jobs = vec![JobRecord::new(1).with_field("title", "A")];
        let bookmarked = HashSet::from([JobId::Int(1)]);

        let mut done = view(jobs.clone());
        done.has_more = false;
        let text = render_feed(&done, &bookmarked);
        assert!(text.contains("[*] A"));
        assert!(text.ends_with("No more jobs."));

        let mut failed = view(jobs);
        failed.error = Some(FeedError::new(2, "offline"));
        assert!(render_feed(&failed, &bookmarked).ends_with("Type `more` to retry."));
    }

    #[test]
    fn detail_lists_known_fields() {
        let job = JobRecord::new(9)
            .with_field("title", "Chef")
            .with_field("phone", "+91 555")
            .with_field("description", "Cook things.");
        let text = render_detail(&job, false);
        assert!(text.starts_with("Chef\nNot bookmarked"));
        assert!(text.contains("Phone       Call: +91 555"));
        assert!(text.contains("\n\nDescription\nCook things.\n\n"));
        assert!(text.ends_with("0 views  |  0 shares  |  0 applications"));
        assert!(!text.contains("Salary"));
        assert!(!text.contains("Additional Information"));
    }

    #[test]
    fn detail_shows_extra_info_stats_and_dates() {
        let job = JobRecord::new(9)
            .with_field("title", "Chef")
            .with_field("phone", "+91 555")
            .with_field("createdOn", "2024-03-05T08:30:00Z")
            .with_field("expiresOn", "2024-04-04T00:00:00Z")
            .with_field(
                "companyDetails",
                serde_json::json!({"buttonText": "Call Manager"}),
            )
            .with_field(
                "additionalInfo",
                serde_json::json!({
                    "views": 40,
                    "shares": 2,
                    "fbShares": 1,
                    "applications": 5,
                    "tags": [{"value": "Urgent", "bgColor": "#FFEBEE"}],
                    "contentV3": {"V1": {"name": "Shift", "value": "Night"}}
                }),
            );
        let text = render_detail(&job, true);

        assert!(text.contains("Phone       Call Manager"));
        assert!(text.contains("Tags        Urgent"));
        assert!(text.contains("Additional Information\nShift: Night"));
        assert!(text.contains("40 views  |  3 shares  |  5 applications"));
        assert!(text.ends_with("Posted: 2024-03-05\nExpires: 2024-04-04"));
    }
}
