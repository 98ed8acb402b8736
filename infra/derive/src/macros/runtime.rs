use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Error, Ident, ItemFn, ReturnType, Type};

const PROFILES: [&str; 2] = ["default", "high_performance"];

/// Expands `#[bps_runtime::main]`.
#[must_use]
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    if input.sig.asyncness.is_none() {
        return Error::new_spanned(
            &input.sig.ident,
            "#[bps_runtime::main] can only be used on async functions",
        )
        .to_compile_error();
    }

    if !returns_result(&input.sig.output) {
        return Error::new_spanned(
            &input.sig.output,
            "#[bps_runtime::main] requires a Result return type",
        )
        .to_compile_error();
    }

    let profile = match profile(args) {
        Ok(profile) => profile,
        Err(err) => return err.to_compile_error(),
    };

    let ItemFn { attrs, vis, sig, block } = input;
    let name = &sig.ident;
    let output = &sig.output;

    quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let config = ::bps_runtime::RuntimeConfig::#profile();
            let rt = ::bps_runtime::build_runtime_with_config(&config)?;
            rt.block_on(async #block)
        }
    }
}

fn profile(args: TokenStream) -> syn::Result<Ident> {
    if args.is_empty() {
        return Ok(format_ident!("default"));
    }

    let ident: Ident = syn::parse2(args)?;
    if PROFILES.iter().any(|p| ident == p) {
        Ok(ident)
    } else {
        Err(Error::new_spanned(
            ident,
            "Unknown runtime profile. Use: high_performance or default",
        ))
    }
}

fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = &**ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|seg| seg.ident == "Result")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_profiles_are_accepted() {
        assert_eq!(profile(TokenStream::new()).map(|p| p.to_string()).ok(), Some("default".into()));
        assert_eq!(
            profile(quote! { high_performance }).map(|p| p.to_string()).ok(),
            Some("high_performance".into())
        );
    }

    #[test]
    fn unknown_profiles_are_rejected() {
        assert!(profile(quote! { memory_efficient }).is_err());
        assert!(profile(quote! { turbo }).is_err());
    }
}
