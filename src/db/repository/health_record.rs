use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_ts, parse_ts, parse_uuid};
use crate::db::DatabaseError;
use crate::models::{HealthRecord, HealthRecordView};

/// Insert a vitals record.
pub fn insert_health_record(conn: &Connection, record: &HealthRecord) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO health_records (id, patient_id, heart_rate, blood_pressure,
         temperature, weight, height, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.id.to_string(),
            record.patient_id.to_string(),
            record.heart_rate,
            record.blood_pressure,
            record.temperature,
            record.weight,
            record.height,
            format_ts(&record.recorded_at),
        ],
    )?;
    Ok(())
}

const SELECT_JOINED: &str = "SELECT h.id, h.patient_id, h.heart_rate, h.blood_pressure,
         h.temperature, h.weight, h.height, h.recorded_at,
         u.name AS patient_name, u.email AS patient_email
         FROM health_records h
         JOIN users u ON h.patient_id = u.id";

/// All vitals records for one patient, newest first, with the owning
/// patient's name and email expanded.
pub fn list_health_records_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<HealthRecordView>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_JOINED} WHERE h.patient_id = ?1 ORDER BY h.recorded_at DESC"
    ))?;
    let rows = stmt.query_map(params![patient_id.to_string()], row_to_health_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(view_from_row(row?)?);
    }
    Ok(records)
}

/// The full vitals collection, newest first. Callers wanting a
/// patient-scoped list must filter themselves.
pub fn list_all_health_records(conn: &Connection) -> Result<Vec<HealthRecordView>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("{SELECT_JOINED} ORDER BY h.recorded_at DESC"))?;
    let rows = stmt.query_map([], row_to_health_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(view_from_row(row?)?);
    }
    Ok(records)
}

struct HealthRow {
    id: String,
    patient_id: String,
    heart_rate: Option<i32>,
    blood_pressure: Option<String>,
    temperature: Option<f64>,
    weight: Option<f64>,
    height: Option<f64>,
    recorded_at: String,
    patient_name: String,
    patient_email: String,
}

fn row_to_health_row(row: &rusqlite::Row) -> Result<HealthRow, rusqlite::Error> {
    Ok(HealthRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        heart_rate: row.get(2)?,
        blood_pressure: row.get(3)?,
        temperature: row.get(4)?,
        weight: row.get(5)?,
        height: row.get(6)?,
        recorded_at: row.get(7)?,
        patient_name: row.get(8)?,
        patient_email: row.get(9)?,
    })
}

fn view_from_row(row: HealthRow) -> Result<HealthRecordView, DatabaseError> {
    Ok(HealthRecordView {
        record: HealthRecord {
            id: parse_uuid(&row.id)?,
            patient_id: parse_uuid(&row.patient_id)?,
            heart_rate: row.heart_rate,
            blood_pressure: row.blood_pressure,
            temperature: row.temperature,
            weight: row.weight,
            height: row.height,
            recorded_at: parse_ts(&row.recorded_at),
        },
        patient_name: row.patient_name,
        patient_email: row.patient_email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::upsert_user_by_wallet;
    use crate::db::sqlite::open_memory_database;
    use crate::models::{UserProfile, UserRole};
    use chrono::NaiveDate;

    fn seed_patient(conn: &Connection, wallet: &str, name: &str) -> Uuid {
        upsert_user_by_wallet(
            conn,
            &UserProfile {
                wallet_address: wallet.into(),
                name: name.into(),
                email: format!("{}@example.com", name.to_lowercase()),
                role: UserRole::Patient,
                specialization: None,
                license_number: None,
                hospital: None,
            },
        )
        .unwrap()
        .id
    }

    fn vitals_at(patient_id: Uuid, day: u32, heart_rate: Option<i32>) -> HealthRecord {
        HealthRecord {
            id: Uuid::new_v4(),
            patient_id,
            heart_rate,
            blood_pressure: Some("120/80".into()),
            temperature: Some(36.8),
            weight: None,
            height: None,
            recorded_at: NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn insert_and_list_for_patient() {
        let conn = open_memory_database().unwrap();
        let patient = seed_patient(&conn, "0xp1", "Pia");

        insert_health_record(&conn, &vitals_at(patient, 1, Some(70))).unwrap();
        insert_health_record(&conn, &vitals_at(patient, 3, Some(82))).unwrap();

        let records = list_health_records_for_patient(&conn, &patient).unwrap();
        assert_eq!(records.len(), 2);
        // Newest first
        assert_eq!(records[0].record.heart_rate, Some(82));
        assert_eq!(records[1].record.heart_rate, Some(70));
        assert_eq!(records[0].patient_name, "Pia");
        assert_eq!(records[0].patient_email, "pia@example.com");
    }

    #[test]
    fn partial_vitals_are_valid() {
        let conn = open_memory_database().unwrap();
        let patient = seed_patient(&conn, "0xp2", "Quin");

        let record = HealthRecord {
            id: Uuid::new_v4(),
            patient_id: patient,
            heart_rate: None,
            blood_pressure: None,
            temperature: None,
            weight: Some(64.5),
            height: None,
            recorded_at: chrono::Utc::now().naive_utc(),
        };
        insert_health_record(&conn, &record).unwrap();

        let records = list_health_records_for_patient(&conn, &patient).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].record.heart_rate.is_none());
        assert_eq!(records[0].record.weight, Some(64.5));
    }

    #[test]
    fn list_all_spans_patients() {
        let conn = open_memory_database().unwrap();
        let p1 = seed_patient(&conn, "0xp3", "Remi");
        let p2 = seed_patient(&conn, "0xp4", "Sade");

        insert_health_record(&conn, &vitals_at(p1, 1, Some(68))).unwrap();
        insert_health_record(&conn, &vitals_at(p1, 2, Some(71))).unwrap();
        insert_health_record(&conn, &vitals_at(p2, 3, Some(90))).unwrap();

        let all = list_all_health_records(&conn).unwrap();
        assert_eq!(all.len(), 3);

        let scoped = list_health_records_for_patient(&conn, &p2).unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].patient_name, "Sade");
    }

    #[test]
    fn insert_rejects_unknown_patient() {
        let conn = open_memory_database().unwrap();
        let result = insert_health_record(&conn, &vitals_at(Uuid::new_v4(), 1, Some(70)));
        assert!(result.is_err());
        assert!(result.unwrap_err().is_constraint());
    }

    #[test]
    fn empty_patient_list_is_empty() {
        let conn = open_memory_database().unwrap();
        let patient = seed_patient(&conn, "0xp5", "Tayo");
        let records = list_health_records_for_patient(&conn, &patient).unwrap();
        assert!(records.is_empty());
    }
}
