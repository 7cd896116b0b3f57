use fiscal_memory::layout::HEADER_SIZE;
use fiscal_memory::{io, FiscalMemoryDump, FmNumberRecord, ZReport};
use fiscal_memory_cli::commands::{info, pack, roundtrip, unpack, verify};

fn sample() -> FiscalMemoryDump {
    let mut dump = FiscalMemoryDump::default();
    dump.meta.id_string = "ПН0000000042".to_string();
    dump.fm_numbers.push(Some(FmNumberRecord {
        date_time: "2022-05-01T09:00:00Z".parse().ok(),
        fm_number: "ФМ00000001".to_string(),
    }));
    dump.test_records.push("2022-04-30T12:00:00Z".parse().ok());
    for n in 1..=3 {
        dump.z_reports.push(Some(ZReport {
            z_number: n,
            date_time: format!("2022-05-0{}T21:00:00Z", n + 1).parse().ok(),
            ..ZReport::default()
        }));
    }
    dump
}

#[test]
fn unpack_then_pack_reproduces_image() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("fm.bin");
    let json = dir.path().join("fm.json");
    let rebuilt = dir.path().join("fm2.bin");
    io::save_file(&image, &sample()).unwrap();

    unpack::run(unpack::UnpackArgs {
        dump: image.clone(),
        output: Some(json.clone()),
        strict: true,
    })
    .unwrap();
    pack::run(pack::PackArgs {
        json,
        output: rebuilt.clone(),
        clear_test_records: false,
    })
    .unwrap();

    assert_eq!(std::fs::read(&image).unwrap(), std::fs::read(&rebuilt).unwrap());
}

#[test]
fn pack_can_clear_test_log() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("fm.json");
    let image = dir.path().join("fm.bin");
    io::save_json(&json, &sample()).unwrap();

    pack::run(pack::PackArgs {
        json,
        output: image.clone(),
        clear_test_records: true,
    })
    .unwrap();

    let dump = io::load_file(&image).unwrap();
    assert!(dump.test_records.is_empty());
    assert_eq!(dump.z_reports.len(), 3);
}

#[test]
fn verify_and_roundtrip_accept_clean_image() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("fm.bin");
    io::save_file(&image, &sample()).unwrap();

    verify::run(verify::VerifyArgs {
        dump: image.clone(),
        hex: true,
    })
    .unwrap();
    roundtrip::run(roundtrip::RoundtripArgs {
        dump: image.clone(),
        output: None,
    })
    .unwrap();
    info::run(info::InfoArgs {
        dump: image,
        json: true,
    })
    .unwrap();
}

#[test]
fn verify_and_strict_unpack_reject_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("fm.bin");
    io::save_file(&image, &sample()).unwrap();
    let mut bytes = std::fs::read(&image).unwrap();
    bytes[HEADER_SIZE + 10] ^= 0x40;
    std::fs::write(&image, &bytes).unwrap();

    let err = verify::run(verify::VerifyArgs {
        dump: image.clone(),
        hex: true,
    })
    .unwrap_err();
    assert!(err.to_string().contains("1 checksum mismatch"));

    assert!(unpack::run(unpack::UnpackArgs {
        dump: image.clone(),
        output: Some(dir.path().join("out.json")),
        strict: true,
    })
    .is_err());

    // Lenient decode still works and re-encoding repairs the checksum.
    let err = roundtrip::run(roundtrip::RoundtripArgs {
        dump: image,
        output: None,
    })
    .unwrap_err();
    assert!(err.to_string().contains("differs at"));
}

#[test]
fn directory_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = info::run(info::InfoArgs {
        dump: dir.path().to_path_buf(),
        json: false,
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("regular file"));
}
