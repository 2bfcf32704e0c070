//! HTML页面渲染
//!
//! 页面是内嵌的HTML字符串，来自存储的文本一律经过 [`escape_html`]。

use mediops_admin::BuildInfo;
use mediops_core::{Appointment, Doctor, Patient, PatientOutcomes};
use std::fmt::Write;

use crate::views::DashboardView;

pub const PRODUCT_NAME: &str = "MediOps";

const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #f4f6fb;
            color: #333;
        }
        nav {
            background: linear-gradient(135deg, #1e88e5 0%, #1565c0 100%);
            padding: 14px 24px;
        }
        nav a { color: white; margin-right: 18px; text-decoration: none; }
        nav a.active { font-weight: bold; text-decoration: underline; }
        .container { max-width: 1200px; margin: 0 auto; padding: 24px; }
        h1 { margin-bottom: 16px; color: #1565c0; }
        .cards {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
            gap: 16px;
            margin-bottom: 24px;
        }
        .card {
            background: white;
            border-radius: 10px;
            padding: 20px;
            box-shadow: 0 6px 20px rgba(0,0,0,0.08);
        }
        .card .label { color: #777; font-size: 0.9rem; }
        .card .value { font-size: 1.8rem; font-weight: bold; margin-top: 6px; }
        .up { color: #2e7d32; }
        .down { color: #c62828; }
        table { width: 100%; border-collapse: collapse; background: white; margin-bottom: 24px; }
        th, td { padding: 10px 12px; border-bottom: 1px solid #eee; text-align: left; }
        th { background: #e3f2fd; }
"#;

const NAV_ITEMS: [(&str, &str); 8] = [
    ("/", "Home"),
    ("/dashboard", "Dashboard"),
    ("/patients", "Patients"),
    ("/doctors", "Doctors"),
    ("/appointments", "Appointments"),
    ("/patient-outcomes", "Patient Outcomes"),
    ("/settings", "Settings"),
    ("/version", "Version"),
];

/// 转义HTML特殊字符
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, active: &str, body: &str) -> String {
    let mut nav = String::new();
    for (href, label) in NAV_ITEMS {
        let class = if href == active { r#" class="active""# } else { "" };
        let _ = write!(nav, r#"<a href="{href}"{class}>{label}</a>"#);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | {PRODUCT_NAME}</title>
    <style>{STYLE}</style>
</head>
<body>
    <nav>{nav}</nav>
    <div class="container">
{body}
    </div>
</body>
</html>"#
    )
}

fn kpi_card(label: &str, value: impl std::fmt::Display) -> String {
    format!(
        r#"<div class="card"><div class="label">{label}</div><div class="value">{value}</div></div>"#
    )
}

fn patient_rows(patients: &[Patient]) -> String {
    let mut rows = String::new();
    for p in patients {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&p.name),
            p.age,
            escape_html(&p.diagnosis),
            escape_html(p.status.as_str())
        );
    }
    rows
}

const PATIENT_HEADER: &str =
    "<tr><th>Name</th><th>Age</th><th>Diagnosis</th><th>Status</th></tr>";

pub fn landing_page() -> String {
    let body = format!(
        r#"        <h1>Welcome to {PRODUCT_NAME}</h1>
        <p>Hospital operations at a glance: patients, doctors, appointments and key performance indicators.</p>
        <div class="cards">
            <div class="card"><a href="/dashboard">Open the dashboard</a></div>
            <div class="card"><a href="/patient-outcomes">Review patient outcomes</a></div>
        </div>"#
    );
    layout("Home", "/", &body)
}

pub fn dashboard_page(view: &DashboardView) -> String {
    let kpi = &view.kpi;
    let mut body = String::from("        <h1>Dashboard</h1>\n        <div class=\"cards\">");
    body.push_str(&kpi_card("Total Patients", kpi.total_patients));
    body.push_str(&kpi_card("Active Doctors", kpi.active_doctors));
    body.push_str(&kpi_card("Today's Appointments", kpi.todays_appointments));
    body.push_str(&kpi_card("Bed Occupancy", format!("{}%", kpi.bed_occupancy)));
    body.push_str("</div>\n");

    let _ = write!(
        body,
        r#"        <h2>Patients ({})</h2>
        <table>{PATIENT_HEADER}{}</table>
"#,
        view.patients.len(),
        patient_rows(&view.patients)
    );

    let mut rows = String::new();
    for a in &view.appointments {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(view.doctors.name_of(a.doctor_id)),
            a.date,
            escape_html(a.status.as_str())
        );
    }
    let _ = write!(
        body,
        r#"        <h2>Appointments ({})</h2>
        <table><tr><th>Doctor</th><th>Date</th><th>Status</th></tr>{rows}</table>"#,
        view.appointments.len()
    );

    layout("Dashboard", "/dashboard", &body)
}

pub fn patients_page(patients: &[Patient]) -> String {
    let body = format!(
        r#"        <h1>Patients</h1>
        <table>{PATIENT_HEADER}{}</table>"#,
        patient_rows(patients)
    );
    layout("Patients", "/patients", &body)
}

pub fn doctors_page(doctors: &[Doctor]) -> String {
    let mut rows = String::new();
    for d in doctors {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(&d.name),
            escape_html(&d.specialization)
        );
    }
    let body = format!(
        r#"        <h1>Doctors</h1>
        <table><tr><th>Name</th><th>Specialization</th></tr>{rows}</table>"#
    );
    layout("Doctors", "/doctors", &body)
}

pub fn appointments_page(appointments: &[(Appointment, Option<Doctor>)]) -> String {
    let mut rows = String::new();
    for (a, doctor) in appointments {
        let doctor_name = doctor.as_ref().map(|d| d.name.as_str()).unwrap_or("Unknown");
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            a.patient_id,
            escape_html(doctor_name),
            a.date,
            escape_html(a.status.as_str())
        );
    }
    let body = format!(
        r#"        <h1>Appointments</h1>
        <table><tr><th>Patient #</th><th>Doctor</th><th>Date</th><th>Status</th></tr>{rows}</table>"#
    );
    layout("Appointments", "/appointments", &body)
}

pub fn patient_outcomes_page(outcomes: &PatientOutcomes) -> String {
    let mut cards = String::new();
    for (label, metric) in outcomes.entries() {
        let trend = if metric.change < 0.0 { "down" } else { "up" };
        let _ = write!(
            cards,
            r#"<div class="card"><div class="label">{label}</div><div class="value">{}</div><div class="{trend}">{:+.2}%</div><div class="label">Previous: {}</div></div>"#,
            metric.value, metric.change, metric.prev
        );
    }
    let body = format!(
        r#"        <h1>Patient Outcomes</h1>
        <div class="cards">{cards}</div>"#
    );
    layout("Patient Outcomes", "/patient-outcomes", &body)
}

pub fn settings_page() -> String {
    let body = r#"        <h1>Settings</h1>
        <div class="card">
            <p>Data source and deployment settings are managed through environment variables.</p>
        </div>"#;
    layout("Settings", "/settings", body)
}

pub fn version_page(build: &BuildInfo) -> String {
    let body = format!(
        r#"        <h1>Version</h1>
        <div class="cards">{}{}</div>"#,
        kpi_card("Version", escape_html(&build.version_tag)),
        kpi_card("Deploy Color", escape_html(&build.deploy_color))
    );
    layout("Version", "/version", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediops_core::PatientStatus;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        assert_eq!(escape_html("O'Brien"), "O&#39;Brien");
    }

    #[test]
    fn test_landing_contains_product_name() {
        assert!(landing_page().contains(PRODUCT_NAME));
    }

    #[test]
    fn test_patients_page_escapes_store_text() {
        let page = patients_page(&[Patient {
            id: 1,
            name: "<script>alert(1)</script>".into(),
            age: 30,
            diagnosis: "Flu".into(),
            status: PatientStatus::Admitted,
        }]);
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_outcomes_page_shows_signed_change() {
        let page = patient_outcomes_page(&PatientOutcomes::fixed());
        assert!(page.contains("+3.53%"));
        assert!(page.contains("-7.69%"));
        assert!(page.contains("4.6 days"));
    }

    #[test]
    fn test_version_page() {
        let page = version_page(&BuildInfo {
            version_tag: "v1.4.0".into(),
            deploy_color: "green".into(),
        });
        assert!(page.contains("v1.4.0"));
        assert!(page.contains("green"));
    }
}
