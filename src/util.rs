/// Unwraps a `Result` inside a loop, skipping to the next iteration on `Err`.
#[macro_export]
macro_rules! ok_or_continue {
	( $e:expr ) => (
		match $e {
			Ok(value) => value,
			Err(_e) => {
				continue;
			},
		}
	)
}
