//! Utility macros.

macro_rules! impl_binop {
    (
        $op:ident,
        $method:ident,
        <$g:ident>,
        $tl:ty,
        $tr:ty,
        $to:ty,
        |$lhs:ident, $rhs:ident| $body:block
    ) => {
        impl<'a, $g: $crate::num::Scalar> ::std::ops::$op<&'a $tr> for &'a $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl<$g: $crate::num::Scalar> ::std::ops::$op<$tr> for &$tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                self.$method(&rhs)
            }
        }

        impl<'a, $g: $crate::num::Scalar> ::std::ops::$op<&'a $tr> for $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl<$g: $crate::num::Scalar> ::std::ops::$op<$tr> for $tl {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

macro_rules! impl_unary_op {
    ($op:ident, $method:ident, <$g:ident>, $t:ty, $to:ty, |$this:ident| $body:block) => {
        impl<$g: $crate::num::Scalar> ::std::ops::$op for &$t {
            type Output = $to;

            #[inline]
            fn $method(self) -> Self::Output {
                let $this = self;
                $body
            }
        }

        impl<$g: $crate::num::Scalar> ::std::ops::$op for $t {
            type Output = $to;

            #[inline]
            fn $method(self) -> Self::Output {
                (&self).$method()
            }
        }
    };
}

macro_rules! impl_abs_diff_eq {
    (<$g:ident>, $t:ty, |$arg1:ident, $arg2:ident, $arg3:ident| $body:block) => {
        impl<$g> ::approx::AbsDiffEq for $t
        where
            $g: $crate::num::Scalar + ::approx::AbsDiffEq,
            <$g as ::approx::AbsDiffEq>::Epsilon: Copy,
        {
            type Epsilon = <$g as ::approx::AbsDiffEq>::Epsilon;

            fn default_epsilon() -> Self::Epsilon {
                <$g as ::approx::AbsDiffEq>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                let $arg1 = self;
                let $arg2 = other;
                let $arg3 = epsilon;
                $body
            }
        }
    };
}

macro_rules! impl_relative_eq {
    (<$g:ident>, $t:ty, |$arg1:ident, $arg2:ident, $arg3:ident, $arg4:ident| $body:block) => {
        impl<$g> ::approx::RelativeEq for $t
        where
            $g: $crate::num::Scalar + ::approx::RelativeEq,
            <$g as ::approx::AbsDiffEq>::Epsilon: Copy,
        {
            fn default_max_relative() -> Self::Epsilon {
                <$g as ::approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                let $arg1 = self;
                let $arg2 = other;
                let $arg3 = epsilon;
                let $arg4 = max_relative;
                $body
            }
        }
    };
}
