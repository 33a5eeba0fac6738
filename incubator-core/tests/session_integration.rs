//! End-to-end tick pipeline scenarios

mod common;

use common::*;
use incubator_core::{AlarmStatus, Channel, ExportOutcome, RunState, SimulationConfig};

#[test]
fn temperature_excursion_is_flagged_and_logged() {
    let mut session = running_session(quiet_config(), 1);
    session.set_manual_temp(38.5);

    let frame = session.tick().unwrap();
    assert!(frame.reading.alarm.contains("TEMP 38.5"));
    assert_eq!(frame.status, AlarmStatus::Active("TEMP 38.5".to_string()));

    session.set_manual_temp(37.0);
    let frame = session.tick().unwrap();
    assert!(!frame.reading.alarm.contains("TEMP"));
    assert_eq!(frame.status, AlarmStatus::Normal);
}

#[test]
fn manual_temperature_holds_for_every_tick() {
    let mut config = quiet_config();
    config.manual_temp = 40.0;
    let mut session = running_session(config, 1);

    for _ in 0..50 {
        let frame = session.tick().unwrap();
        assert_eq!(frame.reading.sample.temp, 40.0);
        assert!(frame.reading.alarm.starts_with("TEMP 40.0"));
    }
}

#[test]
fn manual_override_is_evaluated_at_channel_precision() {
    let mut config = quiet_config();
    config.manual_temp = 38.004;
    config.manual_humid = 61.26;
    let mut session = running_session(config, 1);

    let frame = session.tick().unwrap();
    assert_eq!(frame.reading.sample.temp, 38.0);
    assert_eq!(frame.reading.sample.humid, 61.3);
    assert_eq!(frame.reading.alarm, "");
    assert_eq!(frame.status, AlarmStatus::Normal);

    let rows = parse_export(&session.history().export().unwrap());
    assert_eq!(rows[0].values[Channel::Temp.index()], 38.0);
    assert_eq!(rows[0].values[Channel::Humid.index()], 61.3);
    assert_eq!(rows[0].alarm, "");
}

#[test]
fn paused_alarm_is_still_logged() {
    let mut config = quiet_config();
    config.manual_humid = 80.0;
    let mut session = running_session(config, 1);
    session.toggle_alarm_pause();

    let frame = session.tick().unwrap();
    assert!(frame.alarm_paused);
    assert_eq!(frame.reading.alarm, "HUMID 80.0");
    assert_eq!(frame.status.label(), "paused");
    assert_eq!(session.history().last().unwrap().alarm, "HUMID 80.0");

    session.toggle_alarm_pause();
    let frame = session.tick().unwrap();
    assert_eq!(frame.status, AlarmStatus::Active("HUMID 80.0".to_string()));
}

#[test]
fn stopped_session_produces_nothing() {
    let mut session = running_session(quiet_config(), 1);
    assert_eq!(run_ticks(&mut session, 3), 3);

    session.stop();
    assert_eq!(run_ticks(&mut session, 5), 0);
    assert_eq!(session.history().len(), 3);
    assert_eq!(session.run_state(), RunState::Stopped);

    session.start();
    assert_eq!(run_ticks(&mut session, 2), 2);
    assert_eq!(session.history().len(), 5);
}

#[test]
fn sim_time_accumulates_interval() {
    let mut config = quiet_config();
    config.interval_ms = 500;
    let mut session = running_session(config, 1);

    run_ticks(&mut session, 4);
    assert!((session.sim_time() - 2.0).abs() < 1e-12);
}

#[test]
fn threshold_change_applies_on_next_tick() {
    let mut session = running_session(quiet_config(), 1);
    let frame = session.tick().unwrap();
    assert_eq!(frame.status, AlarmStatus::Normal);

    session.set_threshold(Channel::Fan, 60.0, 100.0).unwrap();
    let frame = session.tick().unwrap();
    assert!(frame.reading.alarm.starts_with("FAN "));
}

#[test]
fn rejected_config_keeps_previous() {
    let mut session = running_session(quiet_config(), 1);
    let slow = SimulationConfig {
        interval_ms: 10_000,
        ..SimulationConfig::default()
    };

    assert!(session.update_config(slow).is_err());
    assert!(session.set_threshold(Channel::Co2, 0.06, 0.03).is_err());
    assert_eq!(session.config(), &quiet_config());
}

#[test]
fn export_round_trip_matches_log() {
    let mut config = quiet_config();
    config.noise_enabled = true;
    config.manual_temp = 38.5;
    let mut session = running_session(config, 11);
    run_ticks(&mut session, 40);

    let rows = parse_export(&session.history().export().unwrap());
    assert_eq!(rows.len(), 40);

    let step = chrono_step(session.config().interval());
    for (i, (row, reading)) in rows.iter().zip(session.history().entries()).enumerate() {
        assert_eq!(row.timestamp, reading.timestamp);
        assert_eq!(row.timestamp, start_instant() + step * i as i32);
        for channel in Channel::ALL {
            assert_eq!(row.values[channel.index()], reading.value(channel), "{channel} row {i}");
        }
        assert_eq!(row.alarm, reading.alarm);
        assert!(row.alarm.starts_with("TEMP 38.5"));
    }
}

#[test]
fn export_multiple_violations_in_one_field() {
    let mut config = quiet_config();
    config.manual_temp = 35.0;
    config.manual_humid = 75.5;
    let mut session = running_session(config, 1);
    session.tick();

    let rows = parse_export(&session.history().export().unwrap());
    assert_eq!(rows[0].alarm, "TEMP 35.0; HUMID 75.5");
}

#[test]
fn export_to_dir_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = running_session(quiet_config(), 1);

    assert_eq!(session.export_to_dir(dir.path()).unwrap(), ExportOutcome::NoData);

    run_ticks(&mut session, 3);
    let ExportOutcome::Written { path, rows } = session.export_to_dir(dir.path()).unwrap() else {
        panic!("expected a written export");
    };
    assert_eq!(rows, 3);
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("incubator_log_20240301_0800"));
    assert!(name.ends_with(".csv"));
    assert_eq!(parse_export(&std::fs::read(&path).unwrap()).len(), 3);

    session.clear_log();
    assert_eq!(session.export_to_dir(dir.path()).unwrap(), ExportOutcome::NoData);
    assert_eq!(session.history().recent(Channel::O2, 10).len(), 3);
}
