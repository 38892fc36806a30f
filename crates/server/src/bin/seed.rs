//! Demo-data seeder for Atrium.
//!
//! Populates a database with a coherent demo set (departments, staff,
//! patients, rooms, appointments, shifts) through the same store API the
//! server uses. Run it once against a fresh database, then start `atrium`
//! pointed at the same file.

use clap::Parser;
use serde_json::json;
use tracing::info;

use atrium_rest::init_logging;
use atrium_store::DocumentStore;
use atrium_store::backends::sqlite::SqliteBackend;

#[derive(Debug, Parser)]
#[command(name = "atrium-seed")]
#[command(about = "Seeds an Atrium database with demo data")]
struct SeedArgs {
    /// SQLite database path to seed.
    #[arg(long, env = "ATRIUM_DATABASE_URL", default_value = "atrium.db")]
    database: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ATRIUM_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

async fn seed(store: &SqliteBackend) -> anyhow::Result<()> {
    let mut departments = Vec::new();
    for (name, description) in [
        ("Cardiology", "Heart and vascular care"),
        ("Oncology", "Cancer diagnosis and treatment"),
        ("Pediatrics", "Care for infants, children, and adolescents"),
        ("Emergency", "Acute and urgent care"),
    ] {
        let dept = store
            .create(
                "departments",
                json!({"name": name, "description": description}),
            )
            .await?;
        departments.push(dept.id().to_string());
    }

    let mut staff = Vec::new();
    for (first, last, role, dept) in [
        ("Grace", "Chen", "doctor", 0),
        ("Miguel", "Santos", "doctor", 0),
        ("Amara", "Okafor", "doctor", 1),
        ("Lena", "Fischer", "nurse", 1),
        ("Tomás", "Oliveira", "nurse", 2),
        ("Priya", "Nair", "doctor", 2),
        ("Samuel", "Kimani", "doctor", 3),
        ("Ines", "Moreau", "nurse", 3),
    ] {
        let member = store
            .create(
                "staff",
                json!({
                    "firstName": first,
                    "lastName": last,
                    "role": role,
                    "status": "active",
                    "email": format!("{}.{}@atrium.example", first.to_lowercase(), last.to_lowercase()),
                    "departmentId": departments[dept],
                }),
            )
            .await?;
        staff.push(member.id().to_string());
    }

    // First doctor of each department heads it.
    for (dept, head) in [(0, 0), (1, 2), (2, 5), (3, 6)] {
        store
            .merge(
                "departments",
                &departments[dept],
                json!({"headStaffId": staff[head]}),
            )
            .await?;
    }

    let mut patients = Vec::new();
    for (first, last, gender, blood) in [
        ("Ada", "Osei", "female", "O+"),
        ("Ben", "Smith", "male", "A-"),
        ("Chiara", "Ricci", "female", "B+"),
        ("David", "Novak", "male", "AB+"),
        ("Emeka", "Eze", "male", "O-"),
        ("Fatima", "Haddad", "female", "A+"),
    ] {
        let patient = store
            .create(
                "patients",
                json!({
                    "firstName": first,
                    "lastName": last,
                    "gender": gender,
                    "bloodGroup": blood,
                    "email": format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
                }),
            )
            .await?;
        patients.push(patient.id().to_string());
    }

    for (number, kind, capacity, occupied, status) in [
        ("101", "ward", 4, 2, "occupied"),
        ("102", "ward", 4, 0, "available"),
        ("201", "icu", 2, 2, "occupied"),
        ("202", "icu", 2, 0, "maintenance"),
        ("301", "operating", 1, 0, "available"),
    ] {
        store
            .create(
                "rooms",
                json!({
                    "number": number,
                    "type": kind,
                    "capacity": capacity,
                    "occupiedBeds": occupied,
                    "status": status,
                }),
            )
            .await?;
    }

    for (patient, doctor, date, time, status, reason) in [
        (0, 0, "2026-09-01", "09:00", "scheduled", "Annual check-up"),
        (1, 1, "2026-09-01", "10:30", "scheduled", "Chest pain follow-up"),
        (2, 2, "2026-09-02", "11:00", "scheduled", "Consultation"),
        (3, 5, "2026-08-20", "14:00", "completed", "Vaccination"),
        (4, 6, "2026-08-18", "16:15", "no-show", "Triage review"),
        (5, 0, "2026-08-15", "08:45", "cancelled", "Echocardiogram"),
    ] {
        store
            .create(
                "appointments",
                json!({
                    "patientId": patients[patient],
                    "staffId": staff[doctor],
                    "date": date,
                    "time": time,
                    "status": status,
                    "reason": reason,
                }),
            )
            .await?;
    }

    for (member, date, start, end, break_start, break_end) in [
        (0, "2026-09-01", "09:00", "17:00", Some("12:00"), Some("12:30")),
        (1, "2026-09-01", "08:00", "16:00", Some("12:00"), Some("12:45")),
        (3, "2026-09-01", "22:00", "06:00", None, None),
        (4, "2026-09-02", "07:00", "15:00", Some("11:30"), Some("12:00")),
        (7, "2026-09-02", "14:00", "23:00", Some("18:00"), Some("18:30")),
    ] {
        let mut shift = json!({
            "staffId": staff[member],
            "date": date,
            "startTime": start,
            "endTime": end,
            "status": "scheduled",
        });
        if let (Some(bs), Some(be)) = (break_start, break_end) {
            shift["breakStart"] = json!(bs);
            shift["breakEnd"] = json!(be);
        }
        store.create("shifts", shift).await?;
    }

    info!(
        departments = departments.len(),
        staff = staff.len(),
        patients = patients.len(),
        "seeded demo data"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = SeedArgs::parse();
    init_logging(&args.log_level);

    info!(database = %args.database, "seeding database");
    let store = SqliteBackend::open(&args.database)?;
    store.init_schema()?;

    seed(&store).await?;
    Ok(())
}
