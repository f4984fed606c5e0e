use std::fmt::{self, Write as _};

/// Positional arguments for [`formatv`]. Built at call sites with the
/// [`args!`](crate::args) macro.
pub type Args<'a> = &'a [&'a dyn fmt::Display];

/// Result of a best-effort render. `mismatched` records a placeholder /
/// argument count mismatch without ever surfacing it to the write path.
pub(crate) struct Rendered {
    pub text: String,
    pub mismatched: bool,
}

/// Substitutes `{}` placeholders from `args`, left to right.
///
/// Never panics and never fails: placeholders without a matching argument
/// stay literal, surplus arguments are ignored. Pure function.
pub fn formatv(fmt: &str, args: Args<'_>) -> String {
    render(fmt, args).text
}

pub(crate) fn render(fmt: &str, args: Args<'_>) -> Rendered {
    let mut text = String::with_capacity(fmt.len() + 16);
    let mut used = 0;
    let mut rest = fmt;
    let mut starved = false;

    while let Some(pos) = rest.find("{}") {
        text.push_str(&rest[..pos]);
        match args.get(used) {
            Some(arg) => {
                // Writing into a String cannot fail.
                let _ = write!(text, "{arg}");
                used += 1;
            }
            None => {
                text.push_str("{}");
                starved = true;
            }
        }
        rest = &rest[pos + 2..];
    }
    text.push_str(rest);

    Rendered {
        text,
        mismatched: starved || used < args.len(),
    }
}

/// Display adapter for raw pointers.
///
/// `{}` placeholders only accept [`Display`](fmt::Display) values, so call
/// sites that log addresses wrap them here; a null pointer renders as `0x0`.
pub struct Ptr<T>(pub *const T);

impl<T> Ptr<T> {
    pub fn null() -> Self {
        Ptr(std::ptr::null())
    }
}

impl<T> fmt::Display for Ptr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.0, f)
    }
}

/// Builds the argument slice for [`formatv`] and the emitter write calls.
///
/// ```
/// use hostwatch_logging::{args, formatv};
///
/// assert_eq!(formatv("-{} {}-", args![3, "c"]), "-3 c-");
/// ```
#[macro_export]
macro_rules! args {
    () => {
        &[] as $crate::Args<'_>
    };
    ($($arg:expr),+ $(,)?) => {
        &[$(&$arg as &dyn ::std::fmt::Display),+][..]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_in_order() {
        assert_eq!(formatv("-{} {}-", args![3, "c"]), "-3 c-");
    }

    #[test]
    fn starved_placeholders_stay_literal() {
        let rendered = render("<X> -{} {}-", args![3]);
        assert_eq!(rendered.text, "<X> -3 {}-");
        assert!(rendered.mismatched);
    }

    #[test]
    fn surplus_arguments_are_ignored() {
        let rendered = render("only {}", args![1, 2, 3]);
        assert_eq!(rendered.text, "only 1");
        assert!(rendered.mismatched);
    }

    #[test]
    fn no_placeholders_passes_through() {
        let rendered = render("plain text", args![]);
        assert_eq!(rendered.text, "plain text");
        assert!(!rendered.mismatched);
    }

    #[test]
    fn null_pointer_renders_as_zero() {
        assert_eq!(formatv("ptr {}", args![Ptr::<u8>::null()]), "ptr 0x0");
    }

    #[test]
    fn empty_format_is_empty() {
        assert_eq!(formatv("", args![]), "");
    }
}
