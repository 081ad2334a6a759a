macro_rules! assert_assembles {
    ($src:expr, [$($code:expr),* $(,)?]) => {
        let expected: Vec<String> = vec![$(String::from($code)),*];
        assert_eq!(common::assemble_text($src), expected);
    };
}
