#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Declare a morphological [`Rule`](crate::Rule).
///
/// `check` receives the bound padas in sequence order and the call's
/// options. The optional `prune` hook receives the same scope with unbound
/// positions as `None`.
#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        id: $id:expr,
        scope: $scope:expr,
        check: |$padas:ident, $opts:ident| $body:block
        $(, prune: |$ppadas:ident, $popts:ident| $pbody:block)?
        $(,)?
    ) => {{
        fn check($padas: &[$crate::Bound<'_>], $opts: &$crate::Options) -> $crate::Result<bool> $body

        let prune: Option<$crate::Prune> = None $(.or({
            fn prune_partial($ppadas: &[Option<$crate::Bound<'_>>], $popts: &$crate::Options) -> $crate::Result<bool> $pbody
            Some(prune_partial as $crate::Prune)
        }))?;

        $crate::Rule { name: $name, id: $id, scope: $scope, check, prune }
    }};
}
