use crate::Executor;

// Tuples nest in compose order: the first element wraps the fetch first and
// the last element ends up outermost.

impl<F> Executor<F> for () {
    type Fetch = F;

    fn wrap(&self, fetch: F) -> Self::Fetch {
        fetch
    }
}

impl<F, E1> Executor<F> for (E1,)
where
    E1: Executor<F>,
{
    type Fetch = E1::Fetch;

    fn wrap(&self, fetch: F) -> Self::Fetch {
        let (e1,) = self;
        e1.wrap(fetch)
    }
}

impl<F, E1, E2> Executor<F> for (E1, E2)
where
    E1: Executor<F>,
    E2: Executor<E1::Fetch>,
{
    type Fetch = E2::Fetch;

    fn wrap(&self, fetch: F) -> Self::Fetch {
        let (e1, e2) = self;
        e2.wrap(e1.wrap(fetch))
    }
}

impl<F, E1, E2, E3> Executor<F> for (E1, E2, E3)
where
    E1: Executor<F>,
    E2: Executor<E1::Fetch>,
    E3: Executor<E2::Fetch>,
{
    type Fetch = E3::Fetch;

    fn wrap(&self, fetch: F) -> Self::Fetch {
        let (e1, e2, e3) = self;
        e3.wrap((e1, e2).wrap(fetch))
    }
}

impl<F, E1, E2, E3, E4> Executor<F> for (E1, E2, E3, E4)
where
    E1: Executor<F>,
    E2: Executor<E1::Fetch>,
    E3: Executor<E2::Fetch>,
    E4: Executor<E3::Fetch>,
{
    type Fetch = E4::Fetch;

    fn wrap(&self, fetch: F) -> Self::Fetch {
        let (e1, e2, e3, e4) = self;
        e4.wrap((e1, e2, e3).wrap(fetch))
    }
}

impl<F, E1, E2, E3, E4, E5> Executor<F> for (E1, E2, E3, E4, E5)
where
    E1: Executor<F>,
    E2: Executor<E1::Fetch>,
    E3: Executor<E2::Fetch>,
    E4: Executor<E3::Fetch>,
    E5: Executor<E4::Fetch>,
{
    type Fetch = E5::Fetch;

    fn wrap(&self, fetch: F) -> Self::Fetch {
        let (e1, e2, e3, e4, e5) = self;
        e5.wrap((e1, e2, e3, e4).wrap(fetch))
    }
}

impl<F, E1, E2, E3, E4, E5, E6> Executor<F> for (E1, E2, E3, E4, E5, E6)
where
    E1: Executor<F>,
    E2: Executor<E1::Fetch>,
    E3: Executor<E2::Fetch>,
    E4: Executor<E3::Fetch>,
    E5: Executor<E4::Fetch>,
    E6: Executor<E5::Fetch>,
{
    type Fetch = E6::Fetch;

    fn wrap(&self, fetch: F) -> Self::Fetch {
        let (e1, e2, e3, e4, e5, e6) = self;
        e6.wrap((e1, e2, e3, e4, e5).wrap(fetch))
    }
}

impl<F, E1, E2, E3, E4, E5, E6, E7> Executor<F> for (E1, E2, E3, E4, E5, E6, E7)
where
    E1: Executor<F>,
    E2: Executor<E1::Fetch>,
    E3: Executor<E2::Fetch>,
    E4: Executor<E3::Fetch>,
    E5: Executor<E4::Fetch>,
    E6: Executor<E5::Fetch>,
    E7: Executor<E6::Fetch>,
{
    type Fetch = E7::Fetch;

    fn wrap(&self, fetch: F) -> Self::Fetch {
        let (e1, e2, e3, e4, e5, e6, e7) = self;
        e7.wrap((e1, e2, e3, e4, e5, e6).wrap(fetch))
    }
}

impl<F, E1, E2, E3, E4, E5, E6, E7, E8> Executor<F> for (E1, E2, E3, E4, E5, E6, E7, E8)
where
    E1: Executor<F>,
    E2: Executor<E1::Fetch>,
    E3: Executor<E2::Fetch>,
    E4: Executor<E3::Fetch>,
    E5: Executor<E4::Fetch>,
    E6: Executor<E5::Fetch>,
    E7: Executor<E6::Fetch>,
    E8: Executor<E7::Fetch>,
{
    type Fetch = E8::Fetch;

    fn wrap(&self, fetch: F) -> Self::Fetch {
        let (e1, e2, e3, e4, e5, e6, e7, e8) = self;
        e8.wrap((e1, e2, e3, e4, e5, e6, e7).wrap(fetch))
    }
}
