use bikestatus::{ClientConfig, Field, FormError, InputKind, InputRecord, PredictionForm};

fn filled_record() -> InputRecord {
    let mut record = InputRecord::new();
    for field in Field::ALL {
        let value = match field.kind() {
            InputKind::Number => "42",
            InputKind::Text => "x",
        };
        record.set(field, value);
    }
    record
}

#[test]
fn test_every_field_is_required() {
    for field in Field::ALL {
        let mut record = filled_record();
        record.set(field, "");
        match record.validate() {
            Err(FormError::MissingFields(names)) => assert_eq!(names, vec![field.name()]),
            other => panic!("{} left empty but got {:?}", field, other),
        }
    }
}

#[test]
fn test_numeric_fields_accept_number_forms() {
    for value in ["0", "168", "4500.00", " 12 ", "-3", "2.5e3"] {
        let mut record = filled_record();
        record.set(Field::Hood158, value);
        record.set(Field::BikeCost, value);
        assert!(record.validate().is_ok(), "rejected {:?}", value);
    }
}

#[test]
fn test_numeric_fields_reject_words() {
    for value in ["abc", "12abc", "NaN", "1,000", "$4500"] {
        let mut record = filled_record();
        record.set(Field::BikeCost, value);
        assert!(
            matches!(record.validate(), Err(FormError::ValidationError(_))),
            "accepted {:?}",
            value
        );
    }
}

#[test]
fn test_values_are_kept_verbatim() {
    let mut record = filled_record();
    record.set(Field::BikeCost, " 4500.00 ");
    assert!(record.validate().is_ok());
    assert_eq!(record.get(Field::BikeCost), " 4500.00 ");
}

#[test]
fn test_set_by_unknown_name() {
    let mut record = InputRecord::new();
    let result = record.set_by_name("BIKE_SPEED", "fast");
    assert!(matches!(result, Err(FormError::UnknownField(_))));
    assert_eq!(record, InputRecord::new());
}

#[test]
fn test_field_metadata() {
    assert_eq!(Field::ALL.len(), 10);
    assert_eq!(Field::LocationType.label(), "Location Type");
    assert_eq!(Field::BikeColour.placeholder(), "e.g., GRN");
    assert_eq!(Field::Hood158.kind(), InputKind::Number);
    assert_eq!(Field::OccDow.kind(), InputKind::Text);
}

#[test]
fn test_blocked_submit_needs_no_service() -> Result<(), Box<dyn std::error::Error>> {
    // Port 9 (discard) is never contacted: the form stops before the network
    let config = ClientConfig::default().with_endpoint("http://127.0.0.1:9/predict")?;
    let form = PredictionForm::with_config(config)?;

    let err = tokio_test::block_on(form.submit()).unwrap_err();
    assert!(matches!(err, FormError::MissingFields(_)));

    let state = tokio_test::block_on(form.snapshot());
    assert_eq!(state.error(), None);
    assert_eq!(state.result(), None);
    Ok(())
}
