use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Expr, ExprLit, ExprUnary, Fields, Lit, LitFloat, Meta, UnOp, Variant,
    parse_macro_input, spanned::Spanned,
};

/// Variant attribute: #[weight(<expr>)]
#[proc_macro_derive(WeightedKeys, attributes(weight))]
pub fn derive_weighted_keys(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let enum_ident = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "WeightedKeys can only be derived for enums",
        ));
    };

    let mut entries = Vec::with_capacity(data_enum.variants.len());
    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new(
                variant.span(),
                "WeightedKeys only supports fieldless variants",
            ));
        }

        let ident = &variant.ident;
        let weight = as_f64_weight(weight_of(variant)?)?;
        entries.push(quote! { (Self::#ident, (#weight)) });
    }

    Ok(quote! {
        impl biased_die::WeightedKeys for #enum_ident {
            const WEIGHTS: &'static [(Self, f64)] = &[
                #(#entries),*
            ];
        }

        impl #enum_ident {
            /// Build a `biased_die::AliasTable` from the variant weights.
            pub fn alias_table() -> ::core::result::Result<
                biased_die::AliasTable<Self>,
                biased_die::ConstructionError,
            >
            where
                Self: Copy + ::core::hash::Hash + ::core::cmp::Eq,
            {
                <Self as biased_die::WeightedKeys>::alias_table()
            }
        }
    })
}

/// The expression inside the variant's single `#[weight(...)]`.
fn weight_of(variant: &Variant) -> syn::Result<Expr> {
    let mut found: Option<Expr> = None;
    for attr in &variant.attrs {
        if !attr.path().is_ident("weight") {
            continue;
        }
        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new(attr.span(), "use #[weight(<expr>)]"));
        };
        if found.is_some() {
            return Err(syn::Error::new(attr.span(), "duplicate #[weight(...)]"));
        }
        let expr = syn::parse2::<Expr>(list.tokens.clone()).map_err(|e| {
            syn::Error::new(list.span(), format!("invalid weight expr: {e}"))
        })?;
        found = Some(expr);
    }
    found.ok_or_else(|| syn::Error::new(variant.span(), "missing #[weight(...)] on variant"))
}

/// Turn a `#[weight]` expression into an `f64` constant expression.
///
/// Integer literals become float literals so `1/100` divides in `f64`.
/// Arithmetic and grouping are walked; anything else (consts, calls) is left
/// for the runtime checks in `AliasTable::from_weights`. A negated non-zero
/// literal can never build a table and is rejected here.
fn as_f64_weight(expr: Expr) -> syn::Result<Expr> {
    match expr {
        Expr::Lit(ExprLit {
            attrs,
            lit: Lit::Int(int),
        }) => {
            let float = LitFloat::new(&format!("{}.0", int.base10_digits()), int.span());
            Ok(Expr::Lit(ExprLit {
                attrs,
                lit: Lit::Float(float),
            }))
        }
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            ref expr,
            ..
        }) if literal_value(expr).is_some_and(|v| v != 0.0) => Err(syn::Error::new(
            expr.span(),
            "weights must be non-negative",
        )),
        Expr::Unary(mut u) => {
            u.expr = Box::new(as_f64_weight(*u.expr)?);
            Ok(Expr::Unary(u))
        }
        Expr::Binary(mut b) => {
            b.left = Box::new(as_f64_weight(*b.left)?);
            b.right = Box::new(as_f64_weight(*b.right)?);
            Ok(Expr::Binary(b))
        }
        Expr::Paren(mut p) => {
            p.expr = Box::new(as_f64_weight(*p.expr)?);
            Ok(Expr::Paren(p))
        }
        Expr::Group(mut g) => {
            g.expr = Box::new(as_f64_weight(*g.expr)?);
            Ok(Expr::Group(g))
        }
        other => Ok(other),
    }
}

/// Numeric value of a (possibly parenthesized) literal.
fn literal_value(expr: &Expr) -> Option<f64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => int.base10_parse::<f64>().ok(),
        Expr::Lit(ExprLit {
            lit: Lit::Float(float),
            ..
        }) => float.base10_parse::<f64>().ok(),
        Expr::Paren(p) => literal_value(&p.expr),
        Expr::Group(g) => literal_value(&g.expr),
        _ => None,
    }
}
