//! End-to-end extraction over synthetic published sheet pages.
//!
//! The pages mimic the export layout: a `<style>` block with one class per
//! background, a row-header `<th>` per row, and spans in the header rows.

use pretty_assertions::assert_eq;
use rusty_roster::extract::skills::{group_averages, RoleFocus};
use rusty_roster::{Category, Color, Config, Dashboard};

const STYLE: &str = "<style>\
    .s0{font-family:Arial;}\
    .s1{background-color:#FFFF00;color:#000000;}\
    .s2{background-color:#92CDDC;}\
    .s3{background-color:#00ff00;}\
    .it{background-color:#da9694;}\
    </style>";

fn td(text: &str) -> String {
    format!("<td class=\"s0\">{}</td>", text)
}

fn styled(text: &str, class: &str) -> String {
    format!("<td class=\"{}\">{}</td>", class, text)
}

fn row(number: usize, cells: &[String]) -> String {
    format!("<tr><th class=\"row-headers-background\">{}</th>{}</tr>", number, cells.concat())
}

fn staff_row(number: usize, name: &str, days: &[String]) -> String {
    let mut cells = vec![styled(name, "s2")];
    cells.extend(days.iter().cloned());
    row(number, &cells)
}

fn project_row(number: usize, id: &str, title: &str, coordinator: &str) -> String {
    let mut cells = vec![td(""), td(id), td(""), td(""), td(title), td("")];
    cells.extend(["14/02", "21/02", "40", "A"].iter().map(|text| td(text)));
    cells.push(td(coordinator));
    cells.push(styled("", "s3"));
    cells.extend(["", "", "srv-1"].iter().map(|text| td(text)));
    row(number, &cells)
}

fn schedule_page() -> String {
    let mut rows = vec![
        row(1, &[td("PLANNING")]),
        row(2, &[td("")]),
        row(3, &[td(""), td("Fri 05/02/16")]),
        row(4, &[td("Name"), "<td colspan=\"7\">Week 1</td>".to_owned(), "<td colspan=\"7\">Week 2</td>".to_owned()]),
    ];

    let mut ana = vec![styled("", "s1"), td("0"), td("Revit Training")];
    ana.extend((3..14).map(|_| td("8")));
    rows.push(staff_row(5, "Ana", &ana));

    let mut budi: Vec<String> = (0..7).map(|_| td("8")).collect();
    budi.extend((7..14).map(|_| styled("", "s1")));
    rows.push(staff_row(6, "Budi", &budi));

    rows.push(staff_row(7, "Citra", &[td("0.5"), td("10")]));
    rows.push(row(8, &[td("None")]));
    rows.push(row(9, &[td("")]));

    rows.push(row(10, &[td(""), "<td colspan=\"6\">ON PROGRESS</td>".to_owned()]));
    rows.push(row(11, &[td(""), td("Nr."), td(""), td(""), td("Title")]));
    rows.push(project_row(12, "101", "Villa Kelapa", "Ana"));
    rows.push(project_row(13, "102", "Haus Bern", "Budi"));
    rows.push(row(14, &[td(""), "<td colspan=\"6\">PROJECT SELESAI</td>".to_owned()]));
    rows.push(project_row(15, "90", "Villa Lama", "Ana"));

    format!(
        "<html><head>{}<script>var a = 1 < 2 && true;</script></head><body><table class=\"waffle\"><tbody>{}</tbody></table></body></html>",
        STYLE,
        rows.concat()
    )
}

fn talent_page() -> String {
    let mut rows: Vec<String> = (1..=14).map(|number| row(number, &[td("")])).collect();
    rows.push(row(15, &[td("No"), td("Name"), td("Since"), td(""), td("DWG"), td("Revit")]));
    rows.push(row(16, &[td("1"), styled("Ana", "it"), td("01.02.15"), td(""), td("4"), td("M")]));
    rows.push(row(
        17,
        &[td("2"), styled("Budi", "s2"), "<td colspan=\"2\">02.03.16</td>".to_owned(), td("5.1"), td("W")],
    ));
    rows.push(row(18, &[td("3"), td("Citra"), td("x")]));
    format!("{}<table>{}</table>", STYLE, rows.concat())
}

#[test]
fn schedule_is_rebuilt_from_anchor() {
    let config = Config::default();
    let dashboard = Dashboard::extract(&schedule_page(), &talent_page(), &config);
    let schedule = dashboard.schedule.as_ref().expect("Should find start date");

    assert_eq!((schedule.anchor.row, schedule.anchor.col), (2, 2));
    assert_eq!(schedule.headers[0], "Staff");
    assert_eq!(schedule.headers[1], "Fri 05/02");
    assert_eq!(schedule.headers.len(), 15);

    let names: Vec<&str> = schedule.records.iter().map(|record| record.staff_name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Budi", "Citra"]);
    for record in &schedule.records {
        assert_eq!(record.days.len(), 14);
    }
    let ana = schedule.find("Ana").unwrap();
    assert_eq!(ana.name_color.as_str(), "#92cddc");
    assert_eq!(ana.days[0].color.as_str(), "#ffff00");
    assert_eq!(ana.days[1].text, "0");
    assert_eq!(schedule.find("Citra").unwrap().days[5].text, "");
}

#[test]
fn metrics_from_schedule() {
    let config = Config::default();
    let dashboard = Dashboard::extract(&schedule_page(), &talent_page(), &config);
    let metrics = dashboard.metrics(&config).expect("Should derive metrics");

    let day_off: Vec<(usize, usize)> = metrics.day_off.iter().map(|summary| (summary.week1, summary.week2)).collect();
    assert_eq!(day_off, vec![(1, 0), (0, 7), (0, 0)]);
    assert_eq!(metrics.free_staff, vec!["Ana"]);
    assert_eq!(metrics.free_by_day.len(), 1);
    assert_eq!(metrics.free_by_day[0].day, "Sat 06/02");
    assert_eq!(metrics.training_days.len(), 1);
    assert_eq!(metrics.training_days[0].days, vec!["Sun 07/02"]);
}

#[test]
fn projects_follow_section_headers() {
    let config = Config::default();
    let dashboard = Dashboard::extract(&schedule_page(), &talent_page(), &config);

    assert_eq!(dashboard.project_start_row, 8);
    let on_progress: Vec<&str> = dashboard
        .projects
        .category(Category::OnProgress)
        .iter()
        .map(|record| record.id.as_str())
        .collect();
    assert_eq!(on_progress, vec!["101", "102"]);
    let done = dashboard.projects.category(Category::ProjectDone);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].title, "Villa Lama");
    assert_eq!(done[0].server, "srv-1");
    assert_eq!(done[0].file_color, Color::parse("#0f0").unwrap());
    assert_eq!(dashboard.projects.for_coordinator("ana").len(), 2);
}

#[test]
fn talent_uses_raw_cell_offsets() {
    let config = Config::default();
    let dashboard = Dashboard::extract(&schedule_page(), &talent_page(), &config);
    let talent = &dashboard.talent;

    assert_eq!(talent.skill_names, vec!["DWG", "Revit"]);
    assert_eq!(talent.len(), 2);
    let ana = talent.find("Ana").unwrap();
    assert_eq!(ana.role, "IT");
    assert_eq!(ana.skill("Revit"), Some("M"));
    let budi = talent.find("Budi").unwrap();
    assert_eq!(budi.role, "Coordinator");
    assert_eq!(budi.hire_date, "02.03.16");
    assert_eq!(budi.skill("DWG"), Some("W"));
    assert_eq!(budi.skill("Revit"), Some(""));

    let averages = group_averages(budi, &RoleFocus::for_role(&budi.role).groups());
    assert!(averages.is_empty());
    let averages = group_averages(ana, &RoleFocus::Staff.groups());
    assert_eq!(averages.len(), 2);
}

#[test]
fn extraction_is_idempotent() {
    let config = Config::default();
    let first = Dashboard::extract(&schedule_page(), &talent_page(), &config);
    let second = Dashboard::extract(&schedule_page(), &talent_page(), &config);
    assert_eq!(first.schedule, second.schedule);
    assert_eq!(first.projects, second.projects);
    assert_eq!(first.talent, second.talent);
    assert_eq!(first.grid, second.grid);
}

#[test]
fn missing_anchor_keeps_other_extractors() {
    let config = Config::from_toml_str("[schedule]\nscan_rows = 2\n").unwrap();
    let dashboard = Dashboard::extract(&schedule_page(), &talent_page(), &config);
    assert!(dashboard.schedule.is_err());
    assert!(dashboard.metrics(&config).is_none());
    assert_eq!(dashboard.project_start_row, 5);
    assert_eq!(dashboard.talent.len(), 2);
}

#[test]
fn report_serializes() {
    let config = Config::default();
    let dashboard = Dashboard::extract(&schedule_page(), &talent_page(), &config);
    let report = serde_json::to_value(dashboard.report(&config)).unwrap();
    assert_eq!(report["schedule"]["anchor"]["date"], "2016-02-05");
    assert_eq!(report["projects"][0]["category"], "PROJECT_DONE");
    assert_eq!(report["talent"]["records"][0]["staff_name"], "Ana");
    assert!(report.get("schedule_error").is_none());
}

#[test]
fn wide_section_row_switches_category() {
    let mut wide = vec![td(""); 17];
    wide.push(td("DOWNLOAD"));
    let rows = [
        row(1, &[td(""), td("ON PROGRESS")]),
        row(2, &wide),
        project_row(3, "7", "Villa", "Ana"),
    ];
    let page = format!("{}<table>{}</table>", STYLE, rows.concat());
    let config = Config::from_toml_str("[projects]\nstart_row = 0\n").unwrap();
    let dashboard = Dashboard::extract(&page, &talent_page(), &config);

    assert!(dashboard.projects.category(Category::OnProgress).is_empty());
    let download = dashboard.projects.category(Category::Download);
    assert_eq!(download.len(), 1);
    assert_eq!(download[0].id, "7");
    assert_eq!(download[0].title, "Villa");
}
