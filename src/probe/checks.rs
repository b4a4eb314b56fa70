use super::*;

impl ProbeRunner<'_> {
    /// GET every expected resource; expect `200` with a body.
    pub fn check_expected_resources(&self) -> Vec<ProbeResult> {
        let expect = Expectation::status(200, BodyRule::NonEmpty);
        self.table
            .resources()
            .iter()
            .map(|path| {
                self.probe(
                    CheckKind::ExpectedResources,
                    ProbeMethod::Get,
                    path,
                    &expect,
                )
            })
            .collect()
    }

    /// HEAD every expected resource; expect `200` and no body.
    pub fn check_head_expected_resources(&self) -> Vec<ProbeResult> {
        let expect = Expectation::status(200, BodyRule::Empty);
        self.table
            .resources()
            .iter()
            .map(|path| {
                self.probe(
                    CheckKind::HeadExpectedResources,
                    ProbeMethod::Head,
                    path,
                    &expect,
                )
            })
            .collect()
    }

    /// GET every redirect without following it; expect `301` to the table target.
    pub fn check_expected_redirects(&self) -> Vec<ProbeResult> {
        self.table
            .redirects()
            .iter()
            .map(|r| {
                self.probe(
                    CheckKind::ExpectedRedirects,
                    ProbeMethod::Get,
                    &r.path,
                    &Expectation::redirect(r.location.as_str(), BodyRule::Any),
                )
            })
            .collect()
    }

    /// HEAD mirrors GET's status line: `301` for redirects, `404` for unknown
    /// paths, never a body.
    pub fn check_head_works_same(&self) -> Vec<ProbeResult> {
        let redirects = self.table.redirects().iter().map(|r| {
            self.probe(
                CheckKind::HeadWorksSame,
                ProbeMethod::Head,
                &r.path,
                &Expectation::redirect(r.location.as_str(), BodyRule::Empty),
            )
        });

        let not_found = Expectation::status(404, BodyRule::Empty);
        let missing = self.table.nonexistent().iter().map(|path| {
            self.probe(
                CheckKind::HeadWorksSame,
                ProbeMethod::Head,
                path,
                &not_found,
            )
        });

        redirects.chain(missing).collect()
    }

    /// GET every unknown path; expect `404`. The body is not checked.
    pub fn check_nonexistent_paths(&self) -> Vec<ProbeResult> {
        let expect = Expectation::status(404, BodyRule::Any);
        self.table
            .nonexistent()
            .iter()
            .map(|path| {
                self.probe(
                    CheckKind::NonexistentPaths,
                    ProbeMethod::Get,
                    path,
                    &expect,
                )
            })
            .collect()
    }

    /// POST a small form to every expected resource; expect `403`.
    pub fn check_nonallowed_methods(&self) -> Vec<ProbeResult> {
        let expect = Expectation::status(403, BodyRule::Any);
        self.table
            .resources()
            .iter()
            .map(|path| {
                self.probe(
                    CheckKind::NonallowedMethods,
                    ProbeMethod::Post,
                    path,
                    &expect,
                )
            })
            .collect()
    }
}
