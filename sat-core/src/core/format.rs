/*!

A unified text-rendering API for terms, clauses, and proof steps. Different contexts want
different renderings of the same object — a term in TPTP input syntax is not the same string as a
term in a debug trace — so rather than fixing one `Display` impl per type, types that can be
rendered multiple ways implement `Formattable` and get `Display`/`Debug` via
[`impl_display_debug_for_formattable`].

*/

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum FormatStyle {
  #[default]
  Default, // TPTP-ish default rendering
  Input, // round-trippable input syntax
  Debug, // internal ids alongside the rendering
}

pub trait Formattable {
  fn repr(&self, out: &mut dyn std::fmt::Write, style: FormatStyle) -> std::fmt::Result;
}

#[macro_export]
macro_rules! impl_display_debug_for_formattable {
  ($t:ty) => {
    impl std::fmt::Display for $t {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <$t as $crate::core::format::Formattable>::repr(self, f, $crate::core::format::FormatStyle::Default)
      }
    }

    impl std::fmt::Debug for $t {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <$t as $crate::core::format::Formattable>::repr(self, f, $crate::core::format::FormatStyle::Debug)
      }
    }
  };
}
pub use impl_display_debug_for_formattable;
