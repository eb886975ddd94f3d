#[macro_export]
macro_rules! doc {
    () => {
        $crate::doc::Document::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut document = $crate::doc::Document::new();
        $( document.insert($key.into(), $crate::doc::Value::from($value)); )+
        document
    }};
}
