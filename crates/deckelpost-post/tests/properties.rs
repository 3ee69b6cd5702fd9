use deckelpost_post::{Command, CommandTranslator, StreamDriver};
use deckelpost_settings::{MeasurementSystem, PostConfig, SpindlePolicy, ToolWordPolicy};
use proptest::prelude::*;

fn optional_length() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(-200.0f64..200.0)
}

fn command_strategy() -> impl Strategy<Value = Command> {
    (
        prop::sample::select(vec!["G0", "G1", "G2", "G3", "M3", "M4", "G21", "G54", "G18"]),
        optional_length(),
        optional_length(),
        optional_length(),
        prop::option::of(0.0f64..80.0),
        prop::option::of(0.0f64..4000.0),
        prop::option::of(0.0f64..12.0),
    )
        .prop_map(|(name, x, y, z, f, s, t)| {
            let mut command = Command::named(name);
            for (letter, value) in [('X', x), ('Y', y), ('Z', z), ('F', f), ('S', s), ('T', t)] {
                if let Some(value) = value {
                    command = command.with_parameter(letter, value);
                }
            }
            command
        })
}

fn config_strategy() -> impl Strategy<Value = PostConfig> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::option::of(1.0f64..5000.0),
    )
        .prop_map(
            |(imperial, modal, axis_modal, zero_points, numbered, every_line, rapid)| PostConfig {
                units: if imperial {
                    MeasurementSystem::Imperial
                } else {
                    MeasurementSystem::Metric
                },
                modal,
                axis_modal,
                output_zero_points: zero_points,
                output_line_numbers: numbered,
                spindle_policy: if every_line {
                    SpindlePolicy::EveryLine
                } else {
                    SpindlePolicy::OnChange
                },
                tool_words: if modal {
                    ToolWordPolicy::Warn
                } else {
                    ToolWordPolicy::Emit
                },
                rapid_feed_override: rapid,
                ..PostConfig::default()
            },
        )
}

proptest! {
    #[test]
    fn no_line_carries_both_y_and_z(
        config in config_strategy(),
        commands in prop::collection::vec(command_strategy(), 0..40),
    ) {
        let mut translator = CommandTranslator::new(&config);
        for command in &commands {
            for line in translator.translate(command).unwrap() {
                prop_assert!(!line.violates_interlock(), "{}", line);
            }
        }
    }

    #[test]
    fn motion_output_always_moves_an_axis(
        config in config_strategy(),
        commands in prop::collection::vec(command_strategy(), 0..40),
    ) {
        let mut translator = CommandTranslator::new(&config);
        for command in &commands {
            let lines = translator.translate(command).unwrap();
            if command.kind.is_motion() {
                for line in &lines {
                    prop_assert!(line.has_axis_word(), "{}", line);
                }
            }
        }
    }

    #[test]
    fn line_numbers_strictly_increase(
        config in config_strategy(),
        commands in prop::collection::vec(command_strategy(), 0..40),
    ) {
        let config = PostConfig { output_line_numbers: true, ..config };
        let result = StreamDriver::new(&config).run(&commands).unwrap();
        let numbers: Vec<u32> = result.lines.iter().filter_map(|line| line.number).collect();
        prop_assert_eq!(numbers.len(), result.lines.len());
        for (index, number) in numbers.iter().enumerate() {
            prop_assert_eq!(*number, index as u32 + 1);
        }
    }

    #[test]
    fn translation_is_idempotent(
        config in config_strategy(),
        commands in prop::collection::vec(command_strategy(), 0..40),
    ) {
        let driver = StreamDriver::new(&config);
        let first = driver.run(&commands).unwrap();
        let second = driver.run(&commands).unwrap();
        prop_assert_eq!(first.to_text(), second.to_text());
        prop_assert_eq!(first.diagnostics, second.diagnostics);
    }
}
