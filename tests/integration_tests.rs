//! Integration tests for Protect It!
//!
//! These tests drive the library the way the UI does:
//! - Password generation from checkbox options
//! - Spelling aid
//! - Complexity indicator
//! - Fingerprint panel
//! - Full input -> roll cycles through the controller

// ============================================================================
// Test Module: Password Generation
// ============================================================================

mod generation_tests {
    use protectit::charset::{GenerationOptions, LOWERCASE, build_charset};
    use protectit::password::{generate_password, generate_password_with};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn all_combinations() -> Vec<GenerationOptions> {
        (0..16u8)
            .map(|bits| GenerationOptions {
                use_symbols: bits & 1 != 0,
                use_uppercase: bits & 2 != 0,
                use_digits: bits & 4 != 0,
                use_lowercase: bits & 8 != 0,
                length: 16,
            })
            .collect()
    }

    #[test]
    fn test_every_option_combination_respects_charset() {
        let mut rng = StdRng::seed_from_u64(2024);
        for options in all_combinations() {
            let charset = build_charset(&options);
            for length in [2usize, 17, 128] {
                let pwd = generate_password_with(&charset, length, &mut rng);
                assert_eq!(pwd.chars().count(), length);
                assert!(
                    pwd.chars().all(|c| charset.contains(c)),
                    "{pwd:?} escapes {options:?}"
                );
            }
        }
    }

    #[test]
    fn test_no_flags_means_lowercase() {
        let options = GenerationOptions {
            use_symbols: false,
            use_uppercase: false,
            use_digits: false,
            use_lowercase: false,
            length: 40,
        };
        let pwd = generate_password(&options);
        assert_eq!(pwd.len(), 40);
        assert!(pwd.chars().all(|c| LOWERCASE.contains(c)));
    }

    #[test]
    fn test_out_of_range_lengths_are_coerced() {
        let mut options = GenerationOptions::default();
        options.length = -5;
        assert_eq!(generate_password(&options).chars().count(), 2);
        options.length = 500;
        assert_eq!(generate_password(&options).chars().count(), 128);
    }

    #[test]
    fn test_symbols_can_be_multibyte() {
        let options = GenerationOptions {
            use_symbols: true,
            use_uppercase: false,
            use_digits: false,
            use_lowercase: false,
            length: 128,
        };
        let mut rng = StdRng::seed_from_u64(3);
        let pwd = generate_password_with(&build_charset(&options), 128, &mut rng);
        // Byte length exceeds char count once a euro sign shows up
        assert_eq!(pwd.chars().count(), 128);
        assert!(pwd.len() >= 128);
    }
}

// ============================================================================
// Test Module: Spelling
// ============================================================================

mod speller_tests {
    use protectit::speller::spell_password;

    #[test]
    fn test_spelling_examples() {
        assert_eq!(spell_password("A"), "Apache");
        assert_eq!(spell_password(""), "");
        assert_eq!(spell_password("Pw9!"), "Pint wear 9 !");
    }

    #[test]
    fn test_one_token_per_character() {
        let pwd = "Ab3&€zQ";
        assert_eq!(spell_password(pwd).split(' ').count(), pwd.chars().count());
    }
}

// ============================================================================
// Test Module: Complexity Indicator
// ============================================================================

mod complexity_tests {
    use protectit::complexity::{
        Complexify, Complexity, ComplexityScorer, Indicator, IndicatorClass,
    };

    fn class(valid: bool, percent: f64) -> IndicatorClass {
        Indicator::from_complexity(Complexity { valid, percent }).class
    }

    #[test]
    fn test_threshold_table() {
        assert_eq!(class(true, 39.6), IndicatorClass::Middle);
        assert_eq!(class(true, 65.4), IndicatorClass::Middle);
        assert_eq!(class(true, 66.0), IndicatorClass::Valid);
        assert_eq!(class(false, 66.0), IndicatorClass::Invalid);
        assert_eq!(class(false, 10.0), IndicatorClass::Invalid);
    }

    #[test]
    fn test_longer_passwords_score_higher() {
        let scorer = Complexify::default();
        let short = scorer.score("abc");
        let long = scorer.score("abcabcabcabc");
        assert!(long.percent > short.percent);
    }
}

// ============================================================================
// Test Module: Controller Round Trips
// ============================================================================

mod controller_tests {
    use std::time::{Duration, Instant};

    use protectit::complexity::IndicatorClass;
    use protectit::controller::{Action, Controller, FocusRequest};
    use protectit::fingerprint::FingerprintRequest;
    use protectit::settings::Settings;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn controller() -> Controller {
        Controller::new(&Settings::default(), true)
    }

    #[test]
    fn test_generate_then_roll_fills_every_view() {
        let mut controller = controller();
        let t0 = Instant::now();
        let mut rng = StdRng::seed_from_u64(99);

        controller.dispatch_with_rng(Action::Generate, t0, &mut rng);
        assert_eq!(controller.take_focus(), FocusRequest::Blur);
        assert!(controller.tick(t0 + Duration::from_millis(100)));

        let state = controller.state();
        assert_eq!(state.password.chars().count(), 16);
        assert_eq!(state.options.length, 16);
        assert!(state.fingerprints.visible);
        assert!(state.fingerprints.qr.is_some());
        assert!(state.fingerprints.visual.is_some());
        let spelling = state.spelling.as_ref().expect("speller shown");
        assert_eq!(spelling.split(' ').count(), 16);
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_manual_edit_updates_length_display() {
        let mut controller = controller();
        controller.dispatch(Action::Edit("abcdefghij".into()), Instant::now());
        controller.roll();
        assert_eq!(controller.state().options.length, 10);
    }

    #[test]
    fn test_clear_resets_to_default_length_and_hides_panels() {
        let mut controller = controller();
        let t0 = Instant::now();
        controller.dispatch(Action::Edit("Secret99".into()), t0);
        controller.roll();

        controller.dispatch(Action::Clear, t0);
        assert!(controller.tick(t0 + Duration::from_secs(1)));
        let state = controller.state();
        assert_eq!(state.options.length, 16);
        assert!(state.spelling.is_none());
        assert!(!state.fingerprints.visible);
        assert_eq!(state.indicator.class, IndicatorClass::Invalid);
    }

    #[test]
    fn test_clear_discards_previous_fingerprints() {
        let mut controller = controller();
        let t0 = Instant::now();
        controller.dispatch(Action::Edit("hunter2".into()), t0);
        controller.roll();
        assert!(controller.state().fingerprints.qr.is_some());

        controller.dispatch(Action::Clear, t0);
        controller.roll();
        let panel = &controller.state().fingerprints;
        assert!(!panel.visible);
        assert!(panel.qr.is_none());
        assert!(panel.visual.is_none());
    }

    #[test]
    fn test_unticking_fingerprints_hides_panel() {
        let mut controller = controller();
        let t0 = Instant::now();
        controller.dispatch(Action::Edit("Secret99".into()), t0);
        controller.roll();

        controller.dispatch(Action::SetFingerprints(FingerprintRequest::default()), t0);
        controller.roll();
        assert!(!controller.state().fingerprints.visible);
    }

    #[test]
    fn test_mask_round_trip() {
        let mut controller = controller();
        let masked = controller.state().masked;
        controller.dispatch(Action::ToggleMask, Instant::now());
        controller.dispatch(Action::ToggleMask, Instant::now());
        assert_eq!(controller.state().masked, masked);
    }

    #[test]
    fn test_toggles_do_not_schedule_a_roll() {
        let mut controller = controller();
        let t0 = Instant::now();
        controller.dispatch(Action::ToggleReadOnly, t0);
        controller.dispatch(Action::ToggleMask, t0);
        assert!(controller.next_roll_in(t0).is_none());
    }
}

// ============================================================================
// Test Module: Settings
// ============================================================================

mod settings_tests {
    use std::io::Write;
    use std::time::Instant;

    use protectit::complexity::ScorerKind;
    use protectit::controller::{Action, Controller};
    use protectit::settings::Settings;

    #[test]
    fn test_settings_file_drives_controller() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "scorer": "zxcvbn",
                "spell_password": false,
                "options": {{ "use_symbols": false, "length": 24 }}
            }}"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.scorer, ScorerKind::Zxcvbn);
        assert!(!settings.options.use_symbols);
        assert!(settings.options.use_digits);

        let controller = Controller::new(&settings, true);
        assert_eq!(controller.state().options.length, 24);
        assert!(!controller.state().spell_password);
    }

    #[test]
    fn test_oversized_default_length_stays_in_range_after_clear() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_length": 1000 }}"#).unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        let mut controller = Controller::new(&settings, true);
        controller.dispatch(Action::Clear, Instant::now());
        controller.roll();
        assert_eq!(controller.state().options.length, 128);
    }
}
