use proptest::prelude::*;
use postlog::sequencer::{self, increment_prefix, Labels};
use postlog::Label;

fn prefix_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{0,4}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_sequence_is_strictly_increasing(count in 1..3000usize) {
        let labels: Vec<Label> = Labels::after(None).take(count).collect();
        prop_assert_eq!(labels[0].to_string(), "A001");
        for pair in labels.windows(2) {
            prop_assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_next_is_greater_and_parses_back(prefix in prefix_strategy(), number in 1..=999u16) {
        let label = Label::new(prefix, number).unwrap();
        let next = sequencer::next(Some(&label));

        prop_assert!(label < next);
        prop_assert_eq!(next.to_string().parse::<Label>().unwrap(), next.clone());
        if number < 999 {
            prop_assert_eq!(next.prefix(), label.prefix());
            prop_assert_eq!(next.number(), number + 1);
        } else {
            prop_assert_eq!(next.number(), 1);
        }
    }

    #[test]
    fn test_increment_prefix_grows_by_at_most_one_letter(prefix in "[A-Z]{1,5}") {
        let incremented = increment_prefix(&prefix);
        let all_z = prefix.bytes().all(|b| b == b'Z');

        if all_z {
            prop_assert_eq!(incremented.len(), prefix.len() + 1);
            prop_assert!(incremented.bytes().all(|b| b == b'A'));
        } else {
            prop_assert_eq!(incremented.len(), prefix.len());
            prop_assert!(incremented > prefix);
        }
    }

    #[test]
    fn test_resume_matches_uninterrupted_run(split in 1..2500usize, tail in 1..50usize) {
        let uninterrupted: Vec<Label> = Labels::after(None).take(split + tail).collect();

        // Pretend the process stopped after `split` labels and resumed from the last one.
        let last_on_disk: Label = uninterrupted[split - 1].to_string().parse().unwrap();
        let resumed: Vec<Label> = Labels::after(Some(last_on_disk)).take(tail).collect();

        prop_assert_eq!(&uninterrupted[split..], &resumed[..]);
    }
}
